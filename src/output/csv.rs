//! Normalization and CSV serialization of the difference table

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{DiffError, Result};
use crate::model::{CellValue, Table};

/// Replace every missing cell with `sentinel`.
///
/// Returns the number of cells filled.
pub fn fill_missing(table: &mut Table, sentinel: &str) -> usize {
    let mut filled = 0;
    for cell in table.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
        if cell.is_null() {
            *cell = CellValue::Text(sentinel.to_string());
            filled += 1;
        }
    }
    filled
}

/// Per-call serialization settings
#[derive(Debug, Clone)]
pub struct CsvOutput {
    delimiter: u8,
    missing: String,
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self {
            delimiter: b',',
            missing: String::new(),
        }
    }
}

impl CsvOutput {
    pub fn new(delimiter: u8, missing: impl Into<String>) -> Self {
        Self {
            delimiter,
            missing: missing.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.delimiter, config.sentinel.clone())
    }

    /// Write header and every row, with no index column and no truncation
    pub fn write<W: Write>(&self, table: &Table, writer: W) -> std::io::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
        for row in &table.rows {
            csv_writer.write_record(
                row.cells.iter().map(|c| c.render(&self.missing).into_owned()),
            )?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write to `path`, replacing it only once the whole table is written
    pub fn write_file(&self, table: &Table, path: &Path) -> Result<()> {
        let to_err = |source: std::io::Error| DiffError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // Mode 0666 less the umask, as a plain create gives
        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let mut tmp = builder.tempfile_in(&dir).map_err(to_err)?;
        self.write(table, tmp.as_file_mut()).map_err(to_err)?;
        tmp.as_file().sync_all().map_err(to_err)?;
        tmp.persist(path).map_err(|e| to_err(e.error))?;

        debug!(path = %path.display(), rows = table.row_count(), "wrote difference table");
        Ok(())
    }
}
