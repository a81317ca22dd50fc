use serde::{Deserialize, Serialize};

//==============================================================================
// Project Model
//==============================================================================

/// Project-level properties compared against review artifacts on import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectProperties {
    pub name: String,
    pub source_language: String,
    pub target_language: String,
}

impl ProjectProperties {
    pub fn new(
        name: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// One translatable unit, addressed by a stable project-wide index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: u32,
    pub source: String,
}

impl Segment {
    pub fn new(index: u32, source: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
        }
    }
}

/// Current translation state of a segment
///
/// `translation == None` means the segment is untranslated, while
/// `Some(String::new())` is a deliberately empty translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationEntry {
    pub translation: Option<String>,
    pub note: Option<String>,
    /// Identity of whoever last changed the translation
    pub changer: Option<String>,
}

impl TranslationEntry {
    pub fn translated(text: impl Into<String>) -> Self {
        Self {
            translation: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Translation text as shown to a reviewer; untranslated reads as empty
    pub fn translation_text(&self) -> &str {
        self.translation.as_deref().unwrap_or("")
    }

    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

/// A source file of the project and its segments in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub segments: Vec<Segment>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

//==============================================================================
// YAML Project Store
//==============================================================================

/// On-disk layout of a YAML project file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub project: ProjectProperties,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(default)]
    pub segments: Vec<SegmentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub index: u32,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changer: Option<String>,
}
