use crate::error::ReviewResult;
use crate::project::{InMemoryProject, Project};
use crate::types::{FileRecord, ProjectDocument, SegmentRecord};
use std::fs;
use std::path::Path;

/// Write a project back to its YAML file, preserving file and segment order
pub fn write_project(path: &Path, project: &InMemoryProject) -> ReviewResult<()> {
    let content = project_to_yaml(project)?;
    fs::write(path, content)?;
    Ok(())
}

/// Serialize a project to the YAML store layout
pub fn project_to_yaml(project: &InMemoryProject) -> ReviewResult<String> {
    let files = project
        .files()
        .iter()
        .map(|file| FileRecord {
            path: file.path.clone(),
            segments: file
                .segments
                .iter()
                .map(|segment| {
                    let entry = project.translation(segment.index);
                    SegmentRecord {
                        index: segment.index,
                        source: segment.source.clone(),
                        translation: entry.translation,
                        note: entry.note,
                        changer: entry.changer,
                    }
                })
                .collect(),
        })
        .collect();

    let document = ProjectDocument {
        project: project.properties().clone(),
        files,
    };

    Ok(serde_yaml::to_string(&document)?)
}
