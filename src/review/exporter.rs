//! Review workbook exporter

use super::document::{ReviewDocument, ReviewMetadata, ReviewRow, ReviewTable};
use super::layout::{
    self, Column, COLUMN_COUNT, FIRST_DATA_ROW, LABEL_ROW, MAX_CELL_CHARS, METADATA_EXPORTED_AT,
    METADATA_GENERATOR, METADATA_PROJECT, METADATA_SHEET, METADATA_SOURCE, METADATA_TARGET,
    TITLE_ROW,
};
use crate::config::ReviewConfig;
use crate::error::{ReviewError, ReviewResult};
use crate::messages::MessageKey;
use crate::project::Project;
use rust_xlsxwriter::{
    Color, DocProperties, Format, FormatAlign, FormatBorder, Note, Workbook, Worksheet,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which source files go into a review workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileSelection {
    #[default]
    All,
    /// Explicit file paths; files are still emitted in project order
    Paths(Vec<String>),
}

impl FileSelection {
    pub fn from_paths(paths: Vec<String>) -> Self {
        if paths.is_empty() {
            FileSelection::All
        } else {
            FileSelection::Paths(paths)
        }
    }

    fn includes(&self, path: &str) -> bool {
        match self {
            FileSelection::All => true,
            FileSelection::Paths(paths) => paths.iter().any(|p| p == path),
        }
    }
}

/// Cell formats for one workbook
struct Formats {
    title: Format,
    label: Format,
    index: Format,
    source: Format,
    editable: Format,
}

impl Formats {
    fn new() -> Self {
        let border = FormatBorder::Thin;
        Self {
            title: Format::new()
                .set_bold()
                .set_italic()
                .set_font_size(14)
                .set_align(FormatAlign::Left),
            label: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(0xC0C0C0))
                .set_border(border),
            index: Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Top)
                .set_border(border),
            source: Format::new()
                .set_text_wrap()
                .set_align(FormatAlign::Top)
                .set_background_color(Color::RGB(0xF2F2F2))
                .set_border(border),
            editable: Format::new()
                .set_text_wrap()
                .set_align(FormatAlign::Top)
                .set_border(border)
                .set_unlocked(),
        }
    }

    fn for_column(&self, column: Column) -> &Format {
        match column {
            Column::Index => &self.index,
            _ if column.is_protected() => &self.source,
            _ => &self.editable,
        }
    }
}

/// Builds review documents from a project and writes them as .xlsx
pub struct ReviewExporter<'a> {
    config: &'a ReviewConfig,
}

impl<'a> ReviewExporter<'a> {
    pub fn new(config: &'a ReviewConfig) -> Self {
        Self { config }
    }

    /// Export the selected files of a project to `output_path`
    pub fn export<P: Project + ?Sized>(
        &self,
        project: &P,
        selection: &FileSelection,
        output_path: &Path,
    ) -> ReviewResult<ReviewDocument> {
        let document = self.build_document(project, selection)?;
        self.write(&document, project, output_path)?;
        Ok(document)
    }

    /// Build the review document for the selected files
    pub fn build_document<P: Project + ?Sized>(
        &self,
        project: &P,
        selection: &FileSelection,
    ) -> ReviewResult<ReviewDocument> {
        if let FileSelection::Paths(paths) = selection {
            for path in paths {
                if !project.files().iter().any(|f| &f.path == path) {
                    return Err(ReviewError::Validation(format!(
                        "Source file '{}' is not part of the project",
                        path
                    )));
                }
            }
        }

        let messages = &self.config.messages;
        let placeholder = self.config.empty_placeholder();
        let mut document = ReviewDocument::new(ReviewMetadata::from_properties(project.properties()));
        let mut used_names = HashSet::new();

        for file in project.files().iter().filter(|f| selection.includes(&f.path)) {
            info!(
                "{}",
                messages.format(MessageKey::FileEntries, &[&file.path, &file.len()])
            );

            let mut table = ReviewTable::new(
                layout::sheet_name_for(&file.path, &mut used_names),
                messages.format(MessageKey::TableHeaderFile, &[&file.path]),
            );

            for segment in &file.segments {
                let entry = project.translation(segment.index);
                let target = match entry.translation.as_deref() {
                    Some("") => placeholder,
                    Some(text) => text,
                    None => "",
                };

                let oversized = [
                    (Column::Source, segment.source.as_str()),
                    (Column::Target, target),
                    (Column::Note, entry.note_text()),
                ]
                .into_iter()
                .find(|(_, text)| text.chars().count() > MAX_CELL_CHARS);
                if let Some((column, _)) = oversized {
                    warn!(
                        "Segment #{} in '{}': {:?} text is longer than {} characters, left out of the review",
                        segment.index, file.path, column, MAX_CELL_CHARS
                    );
                    continue;
                }

                table.rows.push(ReviewRow::new(
                    FIRST_DATA_ROW + table.rows.len() as u32,
                    segment.index,
                    segment.source.as_str(),
                    target,
                    entry.note_text(),
                ));
            }

            document.tables.push(table);
        }

        Ok(document)
    }

    /// Write a review document to an .xlsx file, replacing any existing file
    pub fn write<P: Project + ?Sized>(
        &self,
        document: &ReviewDocument,
        project: &P,
        output_path: &Path,
    ) -> ReviewResult<()> {
        let messages = &self.config.messages;
        info!("{}", messages.get(MessageKey::FileSaving));

        let mut workbook = Workbook::new();
        let metadata = document.metadata.clone().unwrap_or_default();
        let exported_at = chrono::Utc::now().to_rfc3339();
        workbook.set_properties(&Self::doc_properties(&metadata, messages.get(MessageKey::TableHeader)));

        let formats = Formats::new();
        let props = project.properties();
        let print_header = format!(
            "&L{}&R{}",
            escape_header(messages.get(MessageKey::TableHeader)),
            escape_header(&messages.format(MessageKey::TableHeaderProject, &[&props.name]))
        );
        let labels = [
            messages.get(MessageKey::TableHeaderId).to_string(),
            messages.format(MessageKey::TableHeaderSource, &[&props.source_language]),
            messages.format(MessageKey::TableHeaderTarget, &[&props.target_language]),
            messages.get(MessageKey::TableHeaderNote).to_string(),
        ];

        for table in &document.tables {
            let worksheet = workbook.add_worksheet();
            self.write_table(worksheet, table, &labels, &print_header, &formats)?;
        }

        let metadata_sheet = workbook.add_worksheet();
        Self::write_metadata(metadata_sheet, &metadata, &exported_at)?;
        if !document.tables.is_empty() {
            metadata_sheet.set_hidden(true);
        }

        workbook.save(output_path).map_err(|e| {
            ReviewError::Export(format!(
                "Failed to save review workbook '{}': {}",
                output_path.display(),
                e
            ))
        })?;

        info!(
            "{}",
            messages.format(MessageKey::FileSaved, &[&output_path.display()])
        );
        Ok(())
    }

    fn write_table(
        &self,
        worksheet: &mut Worksheet,
        table: &ReviewTable,
        labels: &[String; 4],
        print_header: &str,
        formats: &Formats,
    ) -> ReviewResult<()> {
        debug!("Writing sheet '{}' ({} rows)", table.sheet_name, table.row_count());

        worksheet
            .set_name(&table.sheet_name)
            .map_err(|e| ReviewError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for column in Column::ALL {
            worksheet
                .set_column_width(column.position(), column.char_width())
                .map_err(|e| ReviewError::Export(format!("Failed to set column width: {}", e)))?;
        }

        // Title row across the whole table, with the edit warning attached
        worksheet
            .merge_range(
                TITLE_ROW,
                0,
                TITLE_ROW,
                COLUMN_COUNT - 1,
                &table.title,
                &formats.title,
            )
            .map_err(|e| ReviewError::Export(format!("Failed to write title: {}", e)))?;
        let warning = Note::new(self.config.messages.get(MessageKey::DocumentWarning))
            .set_author(&self.config.reviewer_id);
        worksheet
            .insert_note(TITLE_ROW, 0, &warning)
            .map_err(|e| ReviewError::Export(format!("Failed to add note: {}", e)))?;

        for (column, label) in Column::ALL.iter().zip(labels.iter()) {
            worksheet
                .write_string_with_format(LABEL_ROW, column.position(), label, &formats.label)
                .map_err(|e| ReviewError::Export(format!("Failed to write header: {}", e)))?;
        }

        for row in &table.rows {
            self.write_row(worksheet, row, formats)?;
        }

        worksheet
            .set_freeze_panes(FIRST_DATA_ROW, 0)
            .map_err(|e| ReviewError::Export(format!("Failed to freeze header: {}", e)))?;
        worksheet
            .set_repeat_rows(TITLE_ROW, LABEL_ROW)
            .map_err(|e| ReviewError::Export(format!("Failed to repeat header: {}", e)))?;
        worksheet.set_landscape();
        worksheet.set_print_fit_to_pages(1, 0);
        worksheet.set_header(print_header);

        if self.config.protect_cells {
            worksheet.protect();
        }

        Ok(())
    }

    fn write_row(&self, worksheet: &mut Worksheet, row: &ReviewRow, formats: &Formats) -> ReviewResult<()> {
        let index_format = formats.for_column(Column::Index);
        let index_col = Column::Index.position();
        let written = match row.index {
            Some(index) => worksheet
                .write_number_with_format(row.row, index_col, f64::from(index), index_format)
                .map(|_| ()),
            None => worksheet
                .write_string_with_format(row.row, index_col, &row.raw_index, index_format)
                .map(|_| ()),
        };
        written.map_err(|e| ReviewError::Export(format!("Failed to write index: {}", e)))?;

        let texts = [
            (Column::Source, &row.source),
            (Column::Target, &row.target),
            (Column::Note, &row.note),
        ];
        for (column, text) in texts {
            let format = formats.for_column(column);
            // Blank cells keep their format so empty targets stay editable
            let result = if text.is_empty() {
                worksheet.write_blank(row.row, column.position(), format).map(|_| ())
            } else {
                worksheet
                    .write_string_with_format(row.row, column.position(), text, format)
                    .map(|_| ())
            };
            result.map_err(|e| {
                ReviewError::Export(format!(
                    "Failed to write segment #{}: {}",
                    row.raw_index, e
                ))
            })?;
        }

        Ok(())
    }

    fn doc_properties(metadata: &ReviewMetadata, title: &str) -> DocProperties {
        let mut properties = DocProperties::new()
            .set_title(title)
            .set_comment(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")));
        for (key, value) in Self::metadata_pairs(metadata) {
            properties = properties.set_custom_property(key, value.as_str());
        }
        properties
    }

    fn metadata_pairs(metadata: &ReviewMetadata) -> Vec<(&'static str, String)> {
        [
            (METADATA_PROJECT, &metadata.project_name),
            (METADATA_SOURCE, &metadata.source_language),
            (METADATA_TARGET, &metadata.target_language),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }

    fn write_metadata(
        worksheet: &mut Worksheet,
        metadata: &ReviewMetadata,
        exported_at: &str,
    ) -> ReviewResult<()> {
        worksheet
            .set_name(METADATA_SHEET)
            .map_err(|e| ReviewError::Export(format!("Failed to set metadata sheet name: {}", e)))?;

        let mut pairs = Self::metadata_pairs(metadata);
        pairs.push((METADATA_EXPORTED_AT, exported_at.to_string()));
        pairs.push((
            METADATA_GENERATOR,
            concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).to_string(),
        ));

        for (row, (key, value)) in pairs.iter().enumerate() {
            let row = row as u32;
            worksheet
                .write_string(row, 0, *key)
                .map_err(|e| ReviewError::Export(format!("Failed to write metadata: {}", e)))?;
            worksheet
                .write_string(row, 1, value)
                .map_err(|e| ReviewError::Export(format!("Failed to write metadata: {}", e)))?;
        }

        Ok(())
    }
}

/// Escape `&` control characters in print header text
fn escape_header(text: &str) -> String {
    text.replace('&', "&&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::InMemoryProject;
    use crate::types::{ProjectProperties, Segment, SourceFile, TranslationEntry};

    fn project() -> InMemoryProject {
        let mut project = InMemoryProject::new(ProjectProperties::new("Demo", "en-US", "fr-FR"));
        project
            .add_file(SourceFile {
                path: "docs/intro.txt".to_string(),
                segments: vec![Segment::new(7, "Hello"), Segment::new(8, "World")],
            })
            .unwrap();
        project
            .add_file(SourceFile {
                path: "docs/outro.txt".to_string(),
                segments: vec![Segment::new(9, "Bye")],
            })
            .unwrap();
        project
            .with_translation(7, TranslationEntry::translated(""))
            .unwrap()
            .with_translation(8, TranslationEntry::translated("Monde").with_note("check"))
            .unwrap()
    }

    #[test]
    fn test_build_document_rows() {
        let config = ReviewConfig::default();
        let document = ReviewExporter::new(&config)
            .build_document(&project(), &FileSelection::All)
            .unwrap();

        assert_eq!(document.tables.len(), 2);
        let intro = &document.tables[0];
        assert_eq!(intro.sheet_name, "docs_intro.txt");
        assert_eq!(intro.title, "File: docs/intro.txt");

        let hello = &intro.rows[0];
        assert_eq!(hello.row, FIRST_DATA_ROW);
        assert_eq!(hello.index, Some(7));
        assert_eq!(hello.target, "<EMPTY>");
        assert_eq!(hello.note, "");

        let world = &intro.rows[1];
        assert_eq!(world.row, FIRST_DATA_ROW + 1);
        assert_eq!(world.target, "Monde");
        assert_eq!(world.note, "check");

        // Untranslated stays blank rather than using the placeholder
        assert_eq!(document.tables[1].rows[0].target, "");
    }

    #[test]
    fn test_build_document_metadata() {
        let config = ReviewConfig::default();
        let document = ReviewExporter::new(&config)
            .build_document(&project(), &FileSelection::All)
            .unwrap();
        let metadata = document.metadata.unwrap();
        assert_eq!(metadata.project_name.as_deref(), Some("Demo"));
        assert_eq!(metadata.source_language.as_deref(), Some("en-US"));
        assert_eq!(metadata.target_language.as_deref(), Some("fr-FR"));
    }

    #[test]
    fn test_selection_keeps_project_order() {
        let config = ReviewConfig::default();
        let selection = FileSelection::from_paths(vec![
            "docs/outro.txt".to_string(),
            "docs/intro.txt".to_string(),
        ]);
        let document = ReviewExporter::new(&config)
            .build_document(&project(), &selection)
            .unwrap();
        assert_eq!(document.tables[0].title, "File: docs/intro.txt");
        assert_eq!(document.tables[1].title, "File: docs/outro.txt");
    }

    #[test]
    fn test_selection_subset() {
        let config = ReviewConfig::default();
        let selection = FileSelection::from_paths(vec!["docs/outro.txt".to_string()]);
        let document = ReviewExporter::new(&config)
            .build_document(&project(), &selection)
            .unwrap();
        assert_eq!(document.tables.len(), 1);
        assert_eq!(document.segment_count(), 1);
    }

    #[test]
    fn test_selection_unknown_file() {
        let config = ReviewConfig::default();
        let selection = FileSelection::from_paths(vec!["nope.txt".to_string()]);
        let err = ReviewExporter::new(&config)
            .build_document(&project(), &selection)
            .unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_empty_selection_means_all() {
        assert_eq!(FileSelection::from_paths(Vec::new()), FileSelection::All);
    }

    #[test]
    fn test_escape_header() {
        assert_eq!(escape_header("R&D"), "R&&D");
    }

    #[test]
    fn test_oversized_segment_left_out() {
        let mut project = InMemoryProject::new(ProjectProperties::new("Demo", "en-US", "fr-FR"));
        project
            .add_file(SourceFile {
                path: "big.txt".to_string(),
                segments: vec![
                    Segment::new(1, "x".repeat(MAX_CELL_CHARS + 1)),
                    Segment::new(2, "Small"),
                    Segment::new(3, "Long note"),
                ],
            })
            .unwrap();
        let project = project
            .with_translation(
                3,
                TranslationEntry::translated("Note longue").with_note("n".repeat(MAX_CELL_CHARS + 1)),
            )
            .unwrap();

        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("review.xlsx");
        let config = ReviewConfig::default();
        let document = ReviewExporter::new(&config)
            .export(&project, &FileSelection::All, &output)
            .unwrap();

        let rows = &document.tables[0].rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, Some(2));
        assert_eq!(rows[0].row, FIRST_DATA_ROW);
        assert!(output.exists());
    }

    #[test]
    fn test_export_path_with_apostrophe_at_name_limit() {
        let path = format!("{}'tail.txt", "a".repeat(30));
        let mut project = InMemoryProject::new(ProjectProperties::new("Demo", "en-US", "fr-FR"));
        project
            .add_file(SourceFile {
                path: path.clone(),
                segments: vec![Segment::new(1, "Hello")],
            })
            .unwrap();

        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("review.xlsx");
        let config = ReviewConfig::default();
        let document = ReviewExporter::new(&config)
            .export(&project, &FileSelection::All, &output)
            .unwrap();

        assert_eq!(document.tables[0].sheet_name, "a".repeat(30));
        assert_eq!(document.tables[0].title, format!("File: {}", path));
    }

    #[test]
    fn test_export_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("review.xlsx");
        let config = ReviewConfig::default();

        ReviewExporter::new(&config)
            .export(&project(), &FileSelection::All, &output)
            .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("review.xlsx");
        std::fs::write(&output, b"stale").unwrap();
        let config = ReviewConfig::default();

        ReviewExporter::new(&config)
            .export(&project(), &FileSelection::All, &output)
            .unwrap();
        assert!(std::fs::metadata(&output).unwrap().len() > 5);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let config = ReviewConfig::default();
        let err = ReviewExporter::new(&config)
            .export(
                &project(),
                &FileSelection::All,
                Path::new("/nonexistent/dir/review.xlsx"),
            )
            .unwrap_err();
        assert!(matches!(err, ReviewError::Export(_)));
    }
}
