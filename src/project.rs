//! Host project accessor
//!
//! The review round-trip only needs a narrow view of the translation
//! project: its properties, its files in order, lookup by segment index and
//! a way to store a new translation. [`Project`] is that seam;
//! [`InMemoryProject`] is the implementation used by the YAML store and the
//! tests.

use crate::error::{ReviewError, ReviewResult};
use crate::types::{ProjectProperties, Segment, SourceFile, TranslationEntry};
use std::collections::HashMap;

/// Capabilities the review exporter and importer need from a host project
pub trait Project {
    fn properties(&self) -> &ProjectProperties;

    /// Source files in project order
    fn files(&self) -> &[SourceFile];

    /// Look up a segment by its project-wide index
    fn segment(&self, index: u32) -> Option<&Segment>;

    /// Current translation state; untranslated segments yield a default entry
    fn translation(&self, index: u32) -> TranslationEntry;

    /// Replace the translation state of a segment
    fn set_translation(&mut self, index: u32, entry: TranslationEntry) -> ReviewResult<()>;
}

/// Project held entirely in memory
#[derive(Debug, Clone)]
pub struct InMemoryProject {
    properties: ProjectProperties,
    files: Vec<SourceFile>,
    /// index -> (file position, segment position)
    lookup: HashMap<u32, (usize, usize)>,
    translations: HashMap<u32, TranslationEntry>,
}

impl InMemoryProject {
    pub fn new(properties: ProjectProperties) -> Self {
        Self {
            properties,
            files: Vec::new(),
            lookup: HashMap::new(),
            translations: HashMap::new(),
        }
    }

    /// Append a source file. Segment indices must be unique across the
    /// project and ascend within the file.
    pub fn add_file(&mut self, file: SourceFile) -> ReviewResult<()> {
        let file_pos = self.files.len();
        let mut previous: Option<u32> = None;
        let mut seen = HashMap::new();

        for (seg_pos, segment) in file.segments.iter().enumerate() {
            if let Some(prev) = previous {
                if segment.index <= prev {
                    return Err(ReviewError::Validation(format!(
                        "Segment #{} in '{}' does not follow #{} in ascending order",
                        segment.index, file.path, prev
                    )));
                }
            }
            if self.lookup.contains_key(&segment.index) {
                return Err(ReviewError::Validation(format!(
                    "Duplicate segment index #{} in '{}'",
                    segment.index, file.path
                )));
            }
            previous = Some(segment.index);
            seen.insert(segment.index, (file_pos, seg_pos));
        }

        self.lookup.extend(seen);
        self.files.push(file);
        Ok(())
    }

    /// Seed the translation state of a known segment
    pub fn with_translation(mut self, index: u32, entry: TranslationEntry) -> ReviewResult<Self> {
        self.set_translation(index, entry)?;
        Ok(self)
    }

    pub fn segment_count(&self) -> usize {
        self.lookup.len()
    }

    /// Translation entries that carry any state, ordered by index
    pub fn translations(&self) -> Vec<(u32, &TranslationEntry)> {
        let mut entries: Vec<(u32, &TranslationEntry)> =
            self.translations.iter().map(|(k, v)| (*k, v)).collect();
        entries.sort_by_key(|(index, _)| *index);
        entries
    }
}

impl Project for InMemoryProject {
    fn properties(&self) -> &ProjectProperties {
        &self.properties
    }

    fn files(&self) -> &[SourceFile] {
        &self.files
    }

    fn segment(&self, index: u32) -> Option<&Segment> {
        self.lookup
            .get(&index)
            .map(|&(file_pos, seg_pos)| &self.files[file_pos].segments[seg_pos])
    }

    fn translation(&self, index: u32) -> TranslationEntry {
        self.translations.get(&index).cloned().unwrap_or_default()
    }

    fn set_translation(&mut self, index: u32, entry: TranslationEntry) -> ReviewResult<()> {
        if !self.lookup.contains_key(&index) {
            return Err(ReviewError::Validation(format!(
                "Cannot find segment #{} in the project",
                index
            )));
        }
        if entry == TranslationEntry::default() {
            self.translations.remove(&index);
        } else {
            self.translations.insert(index, entry);
        }
        Ok(())
    }
}
