//! Exporter trait and manager

use crate::comment::CommentRecord;
use crate::error::{Result, SieveError};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column headers shared by every format
pub const HEADER: [&str; 2] = ["Author", "Comment"];

/// Trait for record-set exporters
pub trait Exporter: Send + Sync {
    /// Write the header and every record to `out`
    fn write(&self, records: &[CommentRecord<'_>], out: &mut dyn Write) -> Result<()>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(super::delimited::CsvExporter::new()));
        manager.register(Box::new(super::json::JsonExporter::new()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Write records to `dir/{stem}.{ext}` and return the final path.
    ///
    /// Output goes to a hidden temp file that is flushed and renamed over
    /// the destination; on any failure the temp file is removed and the
    /// destination is left untouched.
    pub fn export_to_file(
        &self,
        records: &[CommentRecord<'_>],
        format: &str,
        dir: &Path,
        stem: &str,
    ) -> Result<PathBuf> {
        let exporter = self.lookup(format)?;

        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let file_name = format!("{}.{}", stem, exporter.file_extension());
        let final_path = dir.join(&file_name);
        let temp_path = dir.join(format!(".{}.tmp", file_name));

        let written = write_temp(exporter, records, &temp_path)
            .and_then(|()| fs::rename(&temp_path, &final_path).map_err(SieveError::from));

        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(err.with_context(format!("Failed to write {}", final_path.display())));
        }

        debug!("Wrote {} records to {:?}", records.len(), final_path);
        Ok(final_path)
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }

    fn lookup(&self, format: &str) -> Result<&dyn Exporter> {
        self.get(format).ok_or_else(|| {
            SieveError::Validation(format!("Unknown export format: {}", format))
        })
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

fn write_temp(exporter: &dyn Exporter, records: &[CommentRecord<'_>], path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    exporter.write(records, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}
