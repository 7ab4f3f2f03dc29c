//! CSV exporter

use super::exporter::{Exporter, HEADER};
use crate::comment::CommentRecord;
use crate::error::Result;
use std::io::Write;

/// Two-column `Author,Comment` CSV, quoted per RFC 4180 where needed
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for CsvExporter {
    fn write(&self, records: &[CommentRecord<'_>], out: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(HEADER)?;
        for record in records {
            writer.write_record([record.author, record.comment])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn format_name(&self) -> &str {
        "csv"
    }

    fn file_extension(&self) -> &str {
        "csv"
    }
}
