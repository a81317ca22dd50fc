//! Provenance check of an imported artifact against the live project

use super::document::ReviewMetadata;
use crate::messages::{MessageKey, Messages};
use crate::types::ProjectProperties;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    ProjectName,
    SourceLanguage,
    TargetLanguage,
}

impl MetadataField {
    fn message_key(self) -> MessageKey {
        match self {
            MetadataField::ProjectName => MessageKey::MismatchProject,
            MetadataField::SourceLanguage => MessageKey::MismatchSource,
            MetadataField::TargetLanguage => MessageKey::MismatchTarget,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataMismatch {
    pub field: MetadataField,
    /// Value recorded in the artifact, `None` when absent
    pub artifact: Option<String>,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "mismatches", rename_all = "snake_case")]
pub enum MetadataVerdict {
    Matches,
    Mismatch(Vec<MetadataMismatch>),
    /// The artifact has no metadata block at all
    Missing,
}

impl MetadataVerdict {
    pub fn is_match(&self) -> bool {
        matches!(self, MetadataVerdict::Matches)
    }

    /// Warning text for the confirmation gate, `None` when nothing to confirm
    pub fn warning(&self, messages: &Messages) -> Option<String> {
        match self {
            MetadataVerdict::Matches => None,
            MetadataVerdict::Missing => Some(messages.get(MessageKey::MetadataMissing).to_string()),
            MetadataVerdict::Mismatch(mismatches) => {
                let unknown = messages.get(MessageKey::MetadataUnknown);
                let details: String = mismatches
                    .iter()
                    .map(|m| {
                        let artifact = m.artifact.as_deref().unwrap_or(unknown);
                        messages.format(m.field.message_key(), &[&artifact, &m.project])
                    })
                    .collect();
                Some(messages.format(MessageKey::MismatchDialog, &[&details]))
            }
        }
    }
}

/// Compare artifact metadata with the live project by exact string equality
pub fn check_metadata(
    metadata: Option<&ReviewMetadata>,
    properties: &ProjectProperties,
) -> MetadataVerdict {
    let metadata = match metadata {
        Some(m) if !m.is_empty() => m,
        _ => return MetadataVerdict::Missing,
    };

    let fields = [
        (
            MetadataField::ProjectName,
            &metadata.project_name,
            &properties.name,
        ),
        (
            MetadataField::SourceLanguage,
            &metadata.source_language,
            &properties.source_language,
        ),
        (
            MetadataField::TargetLanguage,
            &metadata.target_language,
            &properties.target_language,
        ),
    ];

    let mismatches: Vec<MetadataMismatch> = fields
        .into_iter()
        .filter(|(_, artifact, project)| artifact.as_deref() != Some(project.as_str()))
        .map(|(field, artifact, project)| MetadataMismatch {
            field,
            artifact: artifact.clone(),
            project: project.clone(),
        })
        .collect();

    if mismatches.is_empty() {
        MetadataVerdict::Matches
    } else {
        MetadataVerdict::Mismatch(mismatches)
    }
}
