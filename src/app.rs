//! Host-facing review workflows
//!
//! These functions are what an editor host calls: they run one export or
//! import to completion, report every outcome through a [`Notifier`] and
//! never hand a raw error back to the host.

use crate::config::ReviewConfig;
use crate::error::ReviewResult;
use crate::messages::{MessageKey, Messages};
use crate::project::Project;
use crate::review::{
    check_metadata, FileSelection, ImportReport, MetadataVerdict, Reconciler, ReviewExporter,
    ReviewImporter,
};
use crate::types::ProjectProperties;
use std::path::Path;
use tracing::{error, info, warn};

pub const ARTIFACT_EXTENSION: &str = "xlsx";

/// User-visible notices and confirmations
pub trait Notifier {
    fn info(&mut self, title: &str, message: &str);
    fn error(&mut self, title: &str, message: &str);
    /// Ask the user a yes/no question; `true` means proceed
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Transient progress text, ignored unless the host has a status line
    fn status(&mut self, _message: &str) {}
}

/// Application state relevant to the review actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    pub project_loaded: bool,
}

/// How the export/import menu entries should be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub export_enabled: bool,
    pub import_enabled: bool,
    pub export_label: String,
    pub import_label: String,
}

/// Review actions are only available while a project is loaded
pub fn menu_state(state: &AppState, messages: &Messages) -> MenuState {
    MenuState {
        export_enabled: state.project_loaded,
        import_enabled: state.project_loaded,
        export_label: messages.get(MessageKey::MenuExport).to_string(),
        import_label: messages.get(MessageKey::MenuImport).to_string(),
    }
}

/// `[project]_[source]-[target]_review.xlsx`
pub fn default_artifact_name(properties: &ProjectProperties) -> String {
    format!(
        "{}_{}-{}_review.{}",
        properties.name, properties.source_language, properties.target_language, ARTIFACT_EXTENSION
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Completed(ImportReport),
    /// The user declined the metadata confirmation
    Declined,
    Failed,
}

impl ImportOutcome {
    /// Segment indices the host should refresh
    pub fn changed(&self) -> &[u32] {
        match self {
            ImportOutcome::Completed(report) => &report.changed,
            _ => &[],
        }
    }
}

/// Export the selected files; returns whether the artifact was written
pub fn export_review<P: Project + ?Sized>(
    project: &P,
    selection: &FileSelection,
    output: &Path,
    config: &ReviewConfig,
    notifier: &mut dyn Notifier,
) -> bool {
    let messages = &config.messages;
    let title = messages.get(MessageKey::DialogExportTitle);

    match ReviewExporter::new(config).export(project, selection, output) {
        Ok(document) => {
            info!(
                "Exported {} segments in {} tables",
                document.segment_count(),
                document.tables.len()
            );
            notifier.info(
                title,
                &messages.format(MessageKey::FileSaved, &[&output.display()]),
            );
            true
        }
        Err(e) => {
            error!("Review export to '{}' failed: {}", output.display(), e);
            notifier.error(title, &messages.format(MessageKey::ErrorExport, &[&e]));
            false
        }
    }
}

/// Check an artifact's metadata against the project without importing
pub fn check_review<P: Project + ?Sized>(project: &P, input: &Path) -> ReviewResult<MetadataVerdict> {
    let document = ReviewImporter::new(input).load()?;
    Ok(check_metadata(document.metadata.as_ref(), project.properties()))
}

/// Import a reviewed artifact into the project
pub fn import_review<P: Project + ?Sized>(
    project: &mut P,
    input: &Path,
    config: &ReviewConfig,
    notifier: &mut dyn Notifier,
) -> ImportOutcome {
    let messages = &config.messages;
    let title = messages.get(MessageKey::DialogImportTitle);
    info!(
        "{}",
        messages.format(MessageKey::FileImporting, &[&input.display()])
    );
    notifier.status(messages.get(MessageKey::StatusImporting));

    let document = match ReviewImporter::new(input).load() {
        Ok(document) => document,
        Err(e) => {
            error!("Review import of '{}' failed: {}", input.display(), e);
            notifier.error(
                messages.get(MessageKey::DialogImportTitle),
                &messages.format(MessageKey::ErrorImport, &[&input.display(), &e]),
            );
            return ImportOutcome::Failed;
        }
    };

    let verdict = check_metadata(document.metadata.as_ref(), project.properties());
    if let Some(warning) = verdict.warning(messages) {
        warn!("Review metadata check for '{}': {:?}", input.display(), verdict);
        if !notifier.confirm(title, &warning) {
            info!("Import of '{}' declined", input.display());
            notifier.info(
                title,
                &messages.format(MessageKey::ImportDeclined, &[&input.display()]),
            );
            return ImportOutcome::Declined;
        }
    }

    match Reconciler::new(project, config).reconcile(&document) {
        Ok(report) => {
            notifier.status(messages.get(MessageKey::StatusImported));
            notifier.info(
                title,
                &messages.format(
                    MessageKey::ImportSuccessful,
                    &[
                        &input.display(),
                        &report.translations_updated,
                        &report.notes_updated,
                    ],
                ),
            );
            ImportOutcome::Completed(report)
        }
        Err(e) => {
            error!("Review import of '{}' failed: {}", input.display(), e);
            notifier.error(
                title,
                &messages.format(MessageKey::ErrorImport, &[&input.display(), &e]),
            );
            ImportOutcome::Failed
        }
    }
}
