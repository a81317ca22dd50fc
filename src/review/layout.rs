//! Cell layout shared by the exporter and the importer

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Columns of a review table, in sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Index,
    Source,
    Target,
    Note,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Index, Column::Source, Column::Target, Column::Note];

    pub fn position(self) -> u16 {
        match self {
            Column::Index => 0,
            Column::Source => 1,
            Column::Target => 2,
            Column::Note => 3,
        }
    }

    /// Relative width of the column, in millimetres on a landscape page
    pub fn proportional_width(self) -> u16 {
        match self {
            Column::Index => 15,
            Column::Source => 90,
            Column::Target => 90,
            Column::Note => 65,
        }
    }

    /// Column width in spreadsheet character units
    pub fn char_width(self) -> f64 {
        f64::from(self.proportional_width()) / 2.0
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Column::Index | Column::Source)
    }
}

pub const COLUMN_COUNT: u16 = 4;

/// Row holding the file title
pub const TITLE_ROW: u32 = 0;

/// Row holding the column labels
pub const LABEL_ROW: u32 = 1;

/// First row holding segment data
pub const FIRST_DATA_ROW: u32 = 2;

/// Hidden key/value sheet carrying the document metadata
pub const METADATA_SHEET: &str = "_review_metadata";

/// Header table written by early revisions, with the project name in B1
pub const LEGACY_HEADER_SHEET: &str = "_header";

pub const METADATA_PROJECT: &str = "omt-projectName";
pub const METADATA_SOURCE: &str = "omt-sourceLanguage";
pub const METADATA_TARGET: &str = "omt-targetLanguage";
pub const METADATA_EXPORTED_AT: &str = "exported-at";
pub const METADATA_GENERATOR: &str = "generator";

/// Longest text a worksheet cell holds
pub const MAX_CELL_CHARS: usize = 32_767;

const MAX_SHEET_NAME: usize = 31;

/// Sheets that never hold segment rows
pub fn is_reserved_sheet(name: &str) -> bool {
    name == METADATA_SHEET || name == LEGACY_HEADER_SHEET
}

fn illegal_sheet_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\[\]:*?/\\]").expect("static regex"))
}

/// Derive a worksheet name from a source file path
///
/// Illegal characters become `_`, the result is truncated to the 31
/// character sheet-name limit, and collisions with `used` get a `~N`
/// suffix. Names never start or end with an apostrophe. The chosen name is
/// recorded in `used`.
pub fn sheet_name_for(path: &str, used: &mut HashSet<String>) -> String {
    let cleaned = illegal_sheet_chars().replace_all(path, "_");
    let cleaned = cleaned.trim_matches('\'');
    let base = if cleaned.is_empty() || is_reserved_sheet(cleaned) {
        format!("file {}", cleaned)
    } else {
        cleaned.to_string()
    };

    let mut candidate = fit_sheet_name(&base, MAX_SHEET_NAME);
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!("~{}", n);
        candidate = format!(
            "{}{}",
            fit_sheet_name(&base, MAX_SHEET_NAME - suffix.chars().count()),
            suffix
        );
        n += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}

/// Truncate to `max` characters, then drop apostrophes the cut exposed
fn fit_sheet_name(base: &str, max: usize) -> String {
    let truncated: String = base.chars().take(max).collect();
    let trimmed = truncated.trim_matches('\'');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_positions_follow_order() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.position() as usize, i);
        }
    }

    #[test]
    fn test_protected_columns() {
        assert!(Column::Index.is_protected());
        assert!(Column::Source.is_protected());
        assert!(!Column::Target.is_protected());
        assert!(!Column::Note.is_protected());
    }

    #[test]
    fn test_sheet_name_replaces_illegal_chars() {
        let mut used = HashSet::new();
        assert_eq!(sheet_name_for("docs/intro.txt", &mut used), "docs_intro.txt");
        assert_eq!(sheet_name_for("a\\b[1]:*?", &mut used), "a_b_1____");
    }

    #[test]
    fn test_sheet_name_truncated() {
        let mut used = HashSet::new();
        let name = sheet_name_for(
            "very/long/directory/structure/with/a/file.txt",
            &mut used,
        );
        assert_eq!(name.chars().count(), 31);
        assert!(name.starts_with("very_long_directory"));
    }

    #[test]
    fn test_sheet_name_deduplicated() {
        let mut used = HashSet::new();
        let long = "x".repeat(40);
        let first = sheet_name_for(&long, &mut used);
        let second = sheet_name_for(&format!("{}y", long), &mut used);
        assert_ne!(first, second);
        assert!(second.ends_with("~2"));
        assert_eq!(second.chars().count(), 31);
    }

    #[test]
    fn test_sheet_name_case_insensitive_collision() {
        let mut used = HashSet::new();
        sheet_name_for("Readme", &mut used);
        assert_eq!(sheet_name_for("README", &mut used), "README~2");
    }

    #[test]
    fn test_sheet_name_avoids_reserved() {
        let mut used = HashSet::new();
        assert_eq!(sheet_name_for("_header", &mut used), "file _header");
        assert_eq!(sheet_name_for("", &mut used), "file ");
    }

    #[test]
    fn test_sheet_name_never_ends_with_apostrophe() {
        let mut used = HashSet::new();
        let path = format!("{}'tail.txt", "a".repeat(30));

        let first = sheet_name_for(&path, &mut used);
        assert_eq!(first, "a".repeat(30));

        let second = sheet_name_for(&path, &mut used);
        assert_eq!(second, format!("{}~2", "a".repeat(29)));

        let third = sheet_name_for(&format!("{}'x", "b".repeat(28)), &mut used);
        assert_eq!(third, format!("{}'x", "b".repeat(28)));
        let fourth = sheet_name_for(&format!("{}'y", "b".repeat(28)), &mut used);
        assert_eq!(fourth, format!("{}'y", "b".repeat(28)));
        let fifth = sheet_name_for(&format!("{}'x", "b".repeat(28)), &mut used);
        assert_eq!(fifth, format!("{}~2", "b".repeat(28)));

        for name in [&first, &second, &third, &fourth, &fifth] {
            assert!(!name.starts_with('\'') && !name.ends_with('\''));
        }
    }
}
