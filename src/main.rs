use anyhow::Context;
use clap::{Parser, Subcommand};
use segment_review::cli;
use segment_review::config::ReviewConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "segment-review")]
#[command(about = "Export translation segments to a review workbook and merge the review back.")]
#[command(long_about = "segment-review - Offline translation review round-trip

Exports the segments of a translation project to a spreadsheet with one
sheet per source file. Index and source columns are locked; reviewers edit
the Target and Note columns. Importing the workbook merges the edits back.

COMMANDS:
  export  - Project to review workbook (.xlsx)
  import  - Review workbook (.xlsx/.ods) back into the project
  check   - Compare a workbook's project information with a project
  files   - List the source files of a project

EXAMPLES:
  segment-review export demo.yaml                       # Demo_en-US-fr-FR_review.xlsx
  segment-review export demo.yaml r.xlsx --file a.txt   # Only one file
  segment-review import demo.yaml r.xlsx --dry-run      # Preview changes
  segment-review import demo.yaml r.xlsx --yes --json   # Non-interactive, JSON report

LOGGING:
  RUST_LOG=segment_review=debug shows every skipped row.")]
#[command(version)]
struct Cli {
    /// Review configuration file (YAML)
    #[arg(short, long, global = true, env = "SEGMENT_REVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export project segments to a review workbook.

Each selected source file becomes one sheet:
  row 1     file title
  row 2     column labels (#, Source, Target, Note)
  row 3...  one row per segment

Empty translations are written as the placeholder <EMPTY>, untranslated
segments as blank cells. The project name and languages are stored in the
workbook so a later import can detect a mismatch.

An existing file at the output path is overwritten.")]
    /// Export project segments to a review workbook
    Export {
        /// Path to the YAML project file
        project: PathBuf,

        /// Output workbook path (default: [project]_[source]-[target]_review.xlsx)
        output: Option<PathBuf>,

        /// Source file to include (repeatable, default: all files)
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import a reviewed workbook into the project.

Rows are matched by segment index. A row is skipped when its index is
unknown or when its source text no longer matches the project. Changed
targets replace the translation; new notes are appended once.

When the workbook was exported from another project (or carries no
project information) you are asked to confirm; use --yes to skip the
question in scripts.")]
    /// Import a reviewed workbook into the project
    Import {
        /// Path to the YAML project file (updated in place)
        project: PathBuf,

        /// Reviewed workbook (.xlsx or .ods)
        input: PathBuf,

        /// Continue without asking when the workbook does not match the project
        #[arg(short, long)]
        yes: bool,

        /// Preview changes without writing the project file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Print the import report as JSON
        #[arg(long)]
        json: bool,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check that a workbook belongs to the project
    Check {
        /// Path to the YAML project file
        project: PathBuf,

        /// Workbook to check
        input: PathBuf,
    },

    /// List the source files of a project
    Files {
        /// Path to the YAML project file
        project: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "segment_review=debug"
    } else {
        "segment_review=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(
        cli.command,
        Commands::Export { verbose: true, .. } | Commands::Import { verbose: true, .. }
    );
    init_tracing(verbose);

    let config = ReviewConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load review configuration")?;

    match cli.command {
        Commands::Export {
            project,
            output,
            files,
            verbose,
        } => cli::export(project, output, files, &config, verbose)?,

        Commands::Import {
            project,
            input,
            yes,
            dry_run,
            json,
            verbose,
        } => cli::import(project, input, &config, yes, dry_run, json, verbose)?,

        Commands::Check { project, input } => cli::check(project, input, &config)?,

        Commands::Files { project } => cli::files(project)?,
    }

    Ok(())
}
