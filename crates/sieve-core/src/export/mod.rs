//! Export of classified comment sets
//!
//! Each record set is written as `Author,Comment` rows. CSV is the default
//! format; JSON is available for downstream tooling.
//!
//! # Example
//!
//! ```ignore
//! use sieve_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let path = manager.export_to_file(&records, "csv", Path::new("."), "comments_all")?;
//! ```

mod delimited;
mod exporter;
mod json;

pub use delimited::CsvExporter;
pub use exporter::{ExportManager, Exporter, HEADER};
pub use json::JsonExporter;
