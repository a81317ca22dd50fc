//! CLI command handlers

pub mod commands;
mod notifier;

pub use commands::{check, export, files, import};
pub use notifier::ConsoleNotifier;
