//! Review configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! or partial file is valid.

use crate::error::{ReviewError, ReviewResult};
use crate::messages::{MessageKey, Messages};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity recorded as changer of translations updated by an import
pub const DEFAULT_REVIEWER_ID: &str = "xlsx-review";

/// Separator between an existing note and an appended reviewer block
pub const DEFAULT_NOTE_DELIMITER: &str = "\n---\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    pub reviewer_id: String,
    pub note_delimiter: String,
    /// Lock the index and source columns in exported workbooks
    pub protect_cells: bool,
    pub messages: Messages,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            reviewer_id: DEFAULT_REVIEWER_ID.to_string(),
            note_delimiter: DEFAULT_NOTE_DELIMITER.to_string(),
            protect_cells: true,
            messages: Messages::new(),
        }
    }
}

impl ReviewConfig {
    /// Load from a YAML file
    pub fn load(path: &Path) -> ReviewResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReviewError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ReviewConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> ReviewResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ReviewResult<()> {
        if self.reviewer_id.trim().is_empty() {
            return Err(ReviewError::Config("reviewer_id must not be empty".to_string()));
        }
        if self.empty_placeholder().is_empty() {
            return Err(ReviewError::Config(
                "empty_translation message must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Literal written in place of an empty translation
    pub fn empty_placeholder(&self) -> &str {
        self.messages.get(MessageKey::EmptyTranslation)
    }
}
