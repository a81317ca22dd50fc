use crate::error::{ReviewError, ReviewResult};
use crate::project::{InMemoryProject, Project};
use crate::types::{ProjectDocument, Segment, SourceFile, TranslationEntry};
use std::path::Path;

/// Parse a YAML project file into an in-memory project
pub fn parse_project(path: &Path) -> ReviewResult<InMemoryProject> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ReviewError::Parse(format!(
            "Failed to read project file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_project_str(&content)
}

/// Parse YAML project content
pub fn parse_project_str(content: &str) -> ReviewResult<InMemoryProject> {
    let document: ProjectDocument = serde_yaml::from_str(content)?;
    build_project(document)
}

fn build_project(document: ProjectDocument) -> ReviewResult<InMemoryProject> {
    let mut project = InMemoryProject::new(document.project);
    let mut entries = Vec::new();

    for record in document.files {
        let mut file = SourceFile::new(record.path);
        for seg in record.segments {
            let entry = TranslationEntry {
                translation: seg.translation,
                note: seg.note,
                changer: seg.changer,
            };
            if entry != TranslationEntry::default() {
                entries.push((seg.index, entry));
            }
            file.segments.push(Segment::new(seg.index, seg.source));
        }
        project.add_file(file)?;
    }

    for (index, entry) in entries {
        project.set_translation(index, entry)?;
    }

    Ok(project)
}
