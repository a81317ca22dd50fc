//! segment-review - offline translation review round-trip
//!
//! Exports the segments of a translation project to a review workbook
//! (one sheet per source file, index and source locked, target and note
//! editable) and merges the reviewed workbook back into the project.
//!
//! # Features
//!
//! - Protected review workbooks (.xlsx) with project provenance metadata
//! - Import from .xlsx or .ods, with a confirmation gate on metadata mismatch
//! - Reconciliation by segment index with stale-row detection
//! - Idempotent reviewer note accumulation
//! - YAML project store and injected message templates
//!
//! # Example
//!
//! ```no_run
//! use segment_review::config::ReviewConfig;
//! use segment_review::parser::parse_project;
//! use segment_review::review::{FileSelection, ReviewExporter};
//! use std::path::Path;
//!
//! let project = parse_project(Path::new("demo.yaml"))?;
//! let config = ReviewConfig::default();
//!
//! let document = ReviewExporter::new(&config)
//!     .export(&project, &FileSelection::All, Path::new("review.xlsx"))?;
//! println!("Exported {} segments", document.segment_count());
//! # Ok::<(), segment_review::error::ReviewError>(())
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod parser;
pub mod project;
pub mod review;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ReviewError, ReviewResult};
pub use project::{InMemoryProject, Project};
pub use types::{ProjectProperties, Segment, SourceFile, TranslationEntry};
