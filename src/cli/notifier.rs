use crate::app::Notifier;
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

/// Terminal implementation of the notice and confirmation surface
pub struct ConsoleNotifier {
    /// Answer every confirmation with yes
    assume_yes: bool,
    /// Keep stdout clean for machine-readable output
    stderr_only: bool,
}

impl ConsoleNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            stderr_only: false,
        }
    }

    pub fn stderr_only(mut self, stderr_only: bool) -> Self {
        self.stderr_only = stderr_only;
        self
    }

    fn say(&self, text: &str) {
        if self.stderr_only {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&mut self, title: &str, message: &str) {
        self.say(&format!("{} {}", format!("✅ {}:", title).bold().green(), message));
    }

    fn error(&mut self, title: &str, message: &str) {
        eprintln!("{} {}", format!("❌ {}:", title).bold().red(), message);
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.say(&format!("{}", format!("⚠️  {}", title).bold().yellow()));
        self.say(&format!("{}", message.yellow()));

        if self.assume_yes {
            self.say(&format!("   {}", "--yes given, continuing".cyan()));
            return true;
        }

        let stdin = io::stdin();
        if !stdin.is_terminal() {
            self.say(&format!(
                "   {}",
                "Not an interactive terminal, use --yes to continue".cyan()
            ));
            return false;
        }

        eprint!("   [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn status(&mut self, message: &str) {
        self.say(&format!("{}", message.cyan()));
    }
}
