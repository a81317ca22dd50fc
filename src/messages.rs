//! User-visible message templates
//!
//! Every string shown to a reviewer or written into an artifact is named by
//! a [`MessageKey`]. [`Messages`] maps keys to templates with positional
//! `{0}`, `{1}`, ... placeholders and is handed to the components that need
//! it, so a translated table can be injected through configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    MenuExport,
    MenuImport,
    StatusImporting,
    StatusImported,
    FileSaving,
    FileSaved,
    FileEntries,
    FileImporting,
    ErrorExport,
    ErrorImport,
    DialogExportTitle,
    DialogImportTitle,
    ImportSuccessful,
    ImportDeclined,
    MetadataUnknown,
    MetadataMissing,
    MismatchProject,
    MismatchSource,
    MismatchTarget,
    MismatchDialog,
    DocumentWarning,
    TableHeader,
    TableHeaderProject,
    TableHeaderFile,
    TableHeaderId,
    TableHeaderSource,
    TableHeaderTarget,
    TableHeaderNote,
    EmptyTranslation,
    ReviewerNote,
}

impl MessageKey {
    pub const ALL: [MessageKey; 30] = [
        MessageKey::MenuExport,
        MessageKey::MenuImport,
        MessageKey::StatusImporting,
        MessageKey::StatusImported,
        MessageKey::FileSaving,
        MessageKey::FileSaved,
        MessageKey::FileEntries,
        MessageKey::FileImporting,
        MessageKey::ErrorExport,
        MessageKey::ErrorImport,
        MessageKey::DialogExportTitle,
        MessageKey::DialogImportTitle,
        MessageKey::ImportSuccessful,
        MessageKey::ImportDeclined,
        MessageKey::MetadataUnknown,
        MessageKey::MetadataMissing,
        MessageKey::MismatchProject,
        MessageKey::MismatchSource,
        MessageKey::MismatchTarget,
        MessageKey::MismatchDialog,
        MessageKey::DocumentWarning,
        MessageKey::TableHeader,
        MessageKey::TableHeaderProject,
        MessageKey::TableHeaderFile,
        MessageKey::TableHeaderId,
        MessageKey::TableHeaderSource,
        MessageKey::TableHeaderTarget,
        MessageKey::TableHeaderNote,
        MessageKey::EmptyTranslation,
        MessageKey::ReviewerNote,
    ];

    /// Built-in English template
    pub fn default_template(self) -> &'static str {
        match self {
            MessageKey::MenuExport => "Export review workbook...",
            MessageKey::MenuImport => "Import review workbook...",
            MessageKey::StatusImporting => "Importing review workbook...",
            MessageKey::StatusImported => "Review workbook imported",
            MessageKey::FileSaving => "Saving review workbook...",
            MessageKey::FileSaved => "Review workbook saved to {0}",
            MessageKey::FileEntries => "{0}: {1} segments",
            MessageKey::FileImporting => "Importing review workbook {0}",
            MessageKey::ErrorExport => "Error while exporting the review workbook: {0}",
            MessageKey::ErrorImport => "Error while importing {0}: {1}",
            MessageKey::DialogExportTitle => "Export review",
            MessageKey::DialogImportTitle => "Import review",
            MessageKey::ImportSuccessful => {
                "Imported {0}: {1} translations and {2} notes updated"
            }
            MessageKey::ImportDeclined => "Import of {0} cancelled, no segment was changed",
            MessageKey::MetadataUnknown => "unknown",
            MessageKey::MetadataMissing => {
                "The review workbook carries no project information. Import anyway?"
            }
            MessageKey::MismatchProject => "Project name: review is '{0}', project is '{1}'\n",
            MessageKey::MismatchSource => "Source language: review is '{0}', project is '{1}'\n",
            MessageKey::MismatchTarget => "Target language: review is '{0}', project is '{1}'\n",
            MessageKey::MismatchDialog => {
                "The review workbook does not match the current project:\n{0}Import anyway?"
            }
            MessageKey::DocumentWarning => {
                "Only the Target and Note columns are taken into account when this \
                 workbook is imported back. Do not edit the # and Source columns."
            }
            MessageKey::TableHeader => "Translation review",
            MessageKey::TableHeaderProject => "Project: {0}",
            MessageKey::TableHeaderFile => "File: {0}",
            MessageKey::TableHeaderId => "#",
            MessageKey::TableHeaderSource => "Source ({0})",
            MessageKey::TableHeaderTarget => "Target ({0})",
            MessageKey::TableHeaderNote => "Note",
            MessageKey::EmptyTranslation => "<EMPTY>",
            MessageKey::ReviewerNote => "Reviewer: {0}",
        }
    }
}

/// Message table with injected overrides on top of the built-in templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    overrides: HashMap<MessageKey, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: MessageKey, template: impl Into<String>) -> Self {
        self.overrides.insert(key, template.into());
        self
    }

    /// Raw template for a key
    pub fn get(&self, key: MessageKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }

    /// Template with `{n}` placeholders replaced by the matching argument
    pub fn format(&self, key: MessageKey, args: &[&dyn Display]) -> String {
        let mut text = self.get(key).to_string();
        for (n, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", n), &arg.to_string());
        }
        text
    }
}
