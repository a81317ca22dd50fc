//! Review workbook importer - .xlsx / .ods → [`ReviewDocument`]

use super::document::{ReviewDocument, ReviewMetadata, ReviewRow, ReviewTable};
use super::layout::{
    Column, FIRST_DATA_ROW, LEGACY_HEADER_SHEET, METADATA_PROJECT, METADATA_SHEET,
    METADATA_SOURCE, METADATA_TARGET, TITLE_ROW,
};
use crate::error::{ReviewError, ReviewResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads a review artifact back into its document model
pub struct ReviewImporter {
    path: PathBuf,
}

impl ReviewImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load every review table and the metadata block
    pub fn load(&self) -> ReviewResult<ReviewDocument> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| {
            ReviewError::Import(format!(
                "Failed to open review workbook '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut document = ReviewDocument::default();
        let mut legacy: Option<ReviewMetadata> = None;

        for sheet_name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                ReviewError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;

            match sheet_name.as_str() {
                METADATA_SHEET => document.metadata = Some(Self::read_metadata(&range)),
                LEGACY_HEADER_SHEET => legacy = Some(Self::read_legacy_header(&range)),
                _ => {
                    if range.is_empty() {
                        debug!("Skipping empty sheet '{}'", sheet_name);
                        continue;
                    }
                    document.tables.push(Self::read_table(&sheet_name, &range));
                }
            }
        }

        if document.metadata.is_none() {
            document.metadata = legacy;
        }

        Ok(document)
    }

    fn read_table(sheet_name: &str, range: &Range<Data>) -> ReviewTable {
        let title = cell_text(range, TITLE_ROW, 0);
        let mut table = ReviewTable::new(sheet_name, title);
        let last_row = match range.end() {
            Some((row, _)) => row,
            None => return table,
        };

        for row in FIRST_DATA_ROW..=last_row {
            let raw_index = cell_text(range, row, Column::Index.position());
            let source = cell_text(range, row, Column::Source.position());
            let target = cell_text(range, row, Column::Target.position());
            let note = cell_text(range, row, Column::Note.position());

            if raw_index.is_empty() && source.is_empty() && target.is_empty() && note.is_empty() {
                continue;
            }

            let index = range
                .get_value((row, u32::from(Column::Index.position())))
                .and_then(cell_index);
            if index.is_none() {
                warn!(
                    "Sheet '{}' row {}: index '{}' is not a segment number",
                    sheet_name,
                    row + 1,
                    raw_index
                );
            }

            table.rows.push(ReviewRow {
                row,
                index,
                raw_index,
                source,
                target,
                note,
            });
        }

        table
    }

    fn read_metadata(range: &Range<Data>) -> ReviewMetadata {
        let mut metadata = ReviewMetadata::default();
        let last_row = range.end().map(|(row, _)| row).unwrap_or(0);

        for row in 0..=last_row {
            let value = cell_text(range, row, 1);
            if value.is_empty() {
                continue;
            }
            match cell_text(range, row, 0).as_str() {
                METADATA_PROJECT => metadata.project_name = Some(value),
                METADATA_SOURCE => metadata.source_language = Some(value),
                METADATA_TARGET => metadata.target_language = Some(value),
                _ => {}
            }
        }

        metadata
    }

    fn read_legacy_header(range: &Range<Data>) -> ReviewMetadata {
        let name = cell_text(range, 0, 1);
        ReviewMetadata {
            project_name: (!name.is_empty()).then_some(name),
            ..Default::default()
        }
    }
}

/// Cell content as text; missing cells read as empty
fn cell_text(range: &Range<Data>, row: u32, col: u16) -> String {
    match range.get_value((row, u32::from(col))) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Some(other) => other.to_string(),
    }
}

/// Segment index stored in a cell, as a number or as digits
fn cell_index(cell: &Data) -> Option<u32> {
    match cell {
        Data::Int(i) => u32::try_from(*i).ok(),
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
            Some(*f as u32)
        }
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
