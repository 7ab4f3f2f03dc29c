//! JSON exporter

use super::exporter::Exporter;
use crate::comment::CommentRecord;
use crate::error::Result;
use std::io::Write;

/// Pretty-printed array of `{ "author", "comment" }` objects
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for JsonExporter {
    fn write(&self, records: &[CommentRecord<'_>], out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        Ok(())
    }

    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
