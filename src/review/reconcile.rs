//! Merge reviewed rows back into a project

use super::document::{ReviewDocument, ReviewRow};
use crate::config::ReviewConfig;
use crate::error::ReviewResult;
use crate::messages::MessageKey;
use crate::project::Project;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

/// Outcome of reconciling one review document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub translations_updated: usize,
    pub notes_updated: usize,
    /// Indices of changed segments, in the order they were first changed
    pub changed: Vec<u32>,
    /// Rows whose index is not a segment of the project
    pub skipped_unknown: usize,
    /// Rows whose source text no longer matches the project
    pub skipped_stale: usize,
    /// Rows whose index cell is not a segment number
    pub skipped_invalid: usize,
}

impl ImportReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Applies reviewed target and note edits to a project
pub struct Reconciler<'a, P: Project + ?Sized> {
    project: &'a mut P,
    config: &'a ReviewConfig,
}

impl<'a, P: Project + ?Sized> Reconciler<'a, P> {
    pub fn new(project: &'a mut P, config: &'a ReviewConfig) -> Self {
        Self { project, config }
    }

    pub fn reconcile(&mut self, document: &ReviewDocument) -> ReviewResult<ImportReport> {
        let mut report = ImportReport::default();

        for table in &document.tables {
            debug!("Reconciling sheet '{}' ({} rows)", table.sheet_name, table.row_count());
            for row in &table.rows {
                self.reconcile_row(&table.sheet_name, row, &mut report)?;
            }
        }

        info!(
            "{} translations and {} notes updated, {} segments changed",
            report.translations_updated,
            report.notes_updated,
            report.changed.len()
        );
        Ok(report)
    }

    fn reconcile_row(
        &mut self,
        sheet_name: &str,
        row: &ReviewRow,
        report: &mut ImportReport,
    ) -> ReviewResult<()> {
        let index = match row.index {
            Some(index) => index,
            None => {
                warn!(
                    "Sheet '{}' row {}: skipping row with index '{}'",
                    sheet_name,
                    row.row + 1,
                    row.raw_index
                );
                report.skipped_invalid += 1;
                return Ok(());
            }
        };

        let current_source = match self.project.segment(index) {
            Some(segment) => segment.source.as_str(),
            None => {
                debug!("Cannot find segment #{} in the project", index);
                report.skipped_unknown += 1;
                return Ok(());
            }
        };

        if current_source != row.source {
            debug!(
                "Segment #{}: source text changed since export, skipping row",
                index
            );
            report.skipped_stale += 1;
            return Ok(());
        }

        trace!(
            "Segment #{}: target {:?}, note {:?}",
            index,
            row.target,
            row.note
        );

        let mut entry = self.project.translation(index);
        let mut changed = false;

        // The placeholder stands for a deliberately empty translation
        let (target, unchanged) = if row.target == self.config.empty_placeholder() {
            ("", entry.translation.as_deref() == Some(""))
        } else {
            (row.target.as_str(), entry.translation_text() == row.target)
        };

        if !unchanged {
            entry.translation = Some(target.to_string());
            entry.changer = Some(self.config.reviewer_id.clone());
            report.translations_updated += 1;
            changed = true;
        }

        if let Some(note) = self.merged_note(entry.note.as_deref(), &row.note) {
            entry.note = Some(note);
            report.notes_updated += 1;
            changed = true;
        }

        if changed {
            self.project.set_translation(index, entry)?;
            if !report.changed.contains(&index) {
                report.changed.push(index);
            }
        }

        Ok(())
    }

    /// New note text when the reviewed note is not already at the end of the
    /// existing note
    fn merged_note(&self, existing: Option<&str>, reviewed: &str) -> Option<String> {
        if reviewed.is_empty() {
            return None;
        }

        let block = self
            .config
            .messages
            .format(MessageKey::ReviewerNote, &[&reviewed]);

        match existing {
            Some(current) if current.ends_with(reviewed) || current.ends_with(&block) => None,
            Some(current) if !current.is_empty() => {
                Some(format!("{}{}{}", current, self.config.note_delimiter, block))
            }
            _ => Some(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::InMemoryProject;
    use crate::review::document::{ReviewMetadata, ReviewTable};
    use crate::types::{ProjectProperties, Segment, SourceFile, TranslationEntry};
    use pretty_assertions::assert_eq;

    fn project() -> InMemoryProject {
        let mut project = InMemoryProject::new(ProjectProperties::new("Demo", "en-US", "fr-FR"));
        project
            .add_file(SourceFile {
                path: "intro.txt".to_string(),
                segments: vec![
                    Segment::new(7, "Hello"),
                    Segment::new(8, "World"),
                    Segment::new(9, "Bye"),
                ],
            })
            .unwrap();
        project
            .with_translation(7, TranslationEntry::translated(""))
            .unwrap()
            .with_translation(8, TranslationEntry::translated("Monde").with_note("check tone"))
            .unwrap()
    }

    fn document(rows: Vec<ReviewRow>) -> ReviewDocument {
        let mut table = ReviewTable::new("intro.txt", "File: intro.txt");
        table.rows = rows;
        let mut document =
            ReviewDocument::new(ReviewMetadata::from_properties(&ProjectProperties::new(
                "Demo", "en-US", "fr-FR",
            )));
        document.tables.push(table);
        document
    }

    fn reconcile(project: &mut InMemoryProject, document: &ReviewDocument) -> ImportReport {
        let config = ReviewConfig::default();
        Reconciler::new(project, &config).reconcile(document).unwrap()
    }

    #[test]
    fn test_unchanged_rows_change_nothing() {
        let mut project = project();
        let document = document(vec![
            ReviewRow::new(2, 7, "Hello", "<EMPTY>", ""),
            ReviewRow::new(3, 8, "World", "Monde", "check tone"),
            ReviewRow::new(4, 9, "Bye", "", ""),
        ]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report, ImportReport::default());
        assert_eq!(project.translation(7).translation.as_deref(), Some(""));
        assert!(project.translation(9).translation.is_none());
    }

    #[test]
    fn test_placeholder_maps_to_empty_translation() {
        let mut project = project();
        let document = document(vec![ReviewRow::new(2, 9, "Bye", "<EMPTY>", "")]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report.translations_updated, 1);
        assert_eq!(project.translation(9).translation.as_deref(), Some(""));
    }

    #[test]
    fn test_edited_target_updates_translation() {
        let mut project = project();
        let document = document(vec![ReviewRow::new(3, 8, "World", "Le monde", "check tone")]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report.translations_updated, 1);
        assert_eq!(report.notes_updated, 0);
        assert_eq!(report.changed, vec![8]);

        let entry = project.translation(8);
        assert_eq!(entry.translation.as_deref(), Some("Le monde"));
        assert_eq!(entry.changer.as_deref(), Some("xlsx-review"));
        assert_eq!(entry.note.as_deref(), Some("check tone"));
    }

    #[test]
    fn test_new_note_appended_once() {
        let mut project = project();
        let document = document(vec![ReviewRow::new(3, 8, "World", "Monde", "too literal")]);

        let first = reconcile(&mut project, &document);
        assert_eq!(first.notes_updated, 1);
        assert_eq!(first.translations_updated, 0);
        assert_eq!(
            project.translation(8).note.as_deref(),
            Some("check tone\n---\nReviewer: too literal")
        );

        let second = reconcile(&mut project, &document);
        assert_eq!(second, ImportReport::default());
        assert_eq!(
            project.translation(8).note.as_deref(),
            Some("check tone\n---\nReviewer: too literal")
        );
    }

    #[test]
    fn test_note_on_segment_without_note() {
        let mut project = project();
        let document = document(vec![ReviewRow::new(4, 9, "Bye", "", "needs context")]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report.notes_updated, 1);
        assert_eq!(report.translations_updated, 0);
        let entry = project.translation(9);
        assert_eq!(entry.note.as_deref(), Some("Reviewer: needs context"));
        assert!(entry.translation.is_none());
    }

    #[test]
    fn test_stale_source_skipped() {
        let mut project = project();
        let document = document(vec![ReviewRow::new(3, 8, "World!", "Autre", "note")]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report.skipped_stale, 1);
        assert!(report.changed.is_empty());
        assert_eq!(project.translation(8).translation.as_deref(), Some("Monde"));
    }

    #[test]
    fn test_unknown_and_invalid_rows_skipped() {
        let mut project = project();
        let mut invalid = ReviewRow::new(5, 0, "Hello", "x", "");
        invalid.index = None;
        invalid.raw_index = "abc".to_string();
        let document = document(vec![
            ReviewRow::new(2, 99, "Ghost", "Fantome", ""),
            invalid,
            ReviewRow::new(6, 9, "Bye", "Au revoir", ""),
        ]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report.skipped_unknown, 1);
        assert_eq!(report.skipped_invalid, 1);
        assert_eq!(report.changed, vec![9]);
        assert_eq!(project.translation(9).translation.as_deref(), Some("Au revoir"));
    }

    #[test]
    fn test_segment_listed_twice_reported_once() {
        let mut project = project();
        let document = document(vec![
            ReviewRow::new(2, 9, "Bye", "Salut", ""),
            ReviewRow::new(3, 9, "Bye", "Adieu", ""),
        ]);

        let report = reconcile(&mut project, &document);
        assert_eq!(report.translations_updated, 2);
        assert_eq!(report.changed, vec![9]);
        assert_eq!(project.translation(9).translation.as_deref(), Some("Adieu"));
    }

    #[test]
    fn test_custom_delimiter_and_template() {
        let mut project = project();
        let config = ReviewConfig {
            note_delimiter: " | ".to_string(),
            messages: crate::messages::Messages::new()
                .with_override(MessageKey::ReviewerNote, "[{0}] (review)"),
            ..Default::default()
        };
        let document = document(vec![ReviewRow::new(3, 8, "World", "Monde", "fix")]);

        Reconciler::new(&mut project, &config).reconcile(&document).unwrap();
        assert_eq!(
            project.translation(8).note.as_deref(),
            Some("check tone | [fix] (review)")
        );

        // Template with a suffix is still recognised on re-import
        let again = Reconciler::new(&mut project, &config).reconcile(&document).unwrap();
        assert_eq!(again.notes_updated, 0);
    }
}
