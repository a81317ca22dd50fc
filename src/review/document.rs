//! Typed model of a review artifact
//!
//! The exporter builds a [`ReviewDocument`] from a project and renders it;
//! the importer reads an artifact back into the same model before
//! reconciling it.

use crate::types::ProjectProperties;
use serde::Serialize;

/// Document-level provenance block
///
/// Fields are optional because artifacts from early revisions only carry
/// the project name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewMetadata {
    pub project_name: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

impl ReviewMetadata {
    pub fn from_properties(properties: &ProjectProperties) -> Self {
        Self {
            project_name: Some(properties.name.clone()),
            source_language: Some(properties.source_language.clone()),
            target_language: Some(properties.target_language.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.project_name.is_none() && self.source_language.is_none() && self.target_language.is_none()
    }
}

/// One data row of a review table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    /// Zero-based sheet row
    pub row: u32,
    /// Segment index, `None` when the index cell is not a non-negative integer
    pub index: Option<u32>,
    /// Index cell as text, kept for diagnostics
    pub raw_index: String,
    pub source: String,
    pub target: String,
    pub note: String,
}

impl ReviewRow {
    pub fn new(
        row: u32,
        index: u32,
        source: impl Into<String>,
        target: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            row,
            index: Some(index),
            raw_index: index.to_string(),
            source: source.into(),
            target: target.into(),
            note: note.into(),
        }
    }
}

/// Segments of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTable {
    pub sheet_name: String,
    pub title: String,
    pub rows: Vec<ReviewRow>,
}

impl ReviewTable {
    pub fn new(sheet_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDocument {
    pub metadata: Option<ReviewMetadata>,
    pub tables: Vec<ReviewTable>,
}

impl ReviewDocument {
    pub fn new(metadata: ReviewMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            tables: Vec::new(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.tables.iter().map(ReviewTable::row_count).sum()
    }

    pub fn table(&self, sheet_name: &str) -> Option<&ReviewTable> {
        self.tables.iter().find(|t| t.sheet_name == sheet_name)
    }

    /// First row carrying the given segment index
    pub fn row_mut(&mut self, index: u32) -> Option<&mut ReviewRow> {
        self.tables
            .iter_mut()
            .flat_map(|t| t.rows.iter_mut())
            .find(|r| r.index == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_properties() {
        let props = ProjectProperties::new("Demo", "en-US", "fr-FR");
        let metadata = ReviewMetadata::from_properties(&props);
        assert_eq!(metadata.project_name.as_deref(), Some("Demo"));
        assert!(!metadata.is_empty());
        assert!(ReviewMetadata::default().is_empty());
    }

    #[test]
    fn test_row_lookup_across_tables() {
        let mut document = ReviewDocument::new(ReviewMetadata::default());
        let mut first = ReviewTable::new("a", "File: a");
        first.rows.push(ReviewRow::new(2, 1, "One", "Un", ""));
        let mut second = ReviewTable::new("b", "File: b");
        second.rows.push(ReviewRow::new(2, 5, "Five", "Cinq", ""));
        second.rows.push(ReviewRow::new(3, 6, "Six", "", ""));
        document.tables.push(first);
        document.tables.push(second);

        assert_eq!(document.segment_count(), 3);
        document.row_mut(6).unwrap().target = "Six".to_string();
        assert_eq!(document.table("b").unwrap().rows[1].target, "Six");
        assert!(document.row_mut(99).is_none());
    }
}
