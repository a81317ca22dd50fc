//! Review workbook round-trip
//!
//! - Export: project segments → review workbook (.xlsx), one sheet per
//!   source file, index and source locked, target and note editable
//! - Import: review workbook (.xlsx / .ods) → document model → metadata
//!   check → reconciliation into the project

mod document;
mod exporter;
mod importer;
pub mod layout;
mod metadata;
mod reconcile;

pub use document::{ReviewDocument, ReviewMetadata, ReviewRow, ReviewTable};
pub use exporter::{FileSelection, ReviewExporter};
pub use importer::ReviewImporter;
pub use metadata::{check_metadata, MetadataField, MetadataMismatch, MetadataVerdict};
pub use reconcile::{ImportReport, Reconciler};
