//! CSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{DiffError, Result};
use crate::model::{find_duplicate_name, CellValue, Column, Table};

/// Markers read as a missing value, in addition to blank cells
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parser for comma (or other single-byte) delimited files with a header row
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse a file into a Table
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let file = File::open(path).map_err(|e| DiffError::load(path, e))?;
        let table = self.parse_reader(BufReader::new(file), path)?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }

    /// Parse from any reader; `origin` is only used in error messages
    pub fn parse_reader<R: Read>(&self, reader: R, origin: &Path) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| DiffError::load(origin, e))?
            .clone();

        if headers.is_empty() {
            return Err(DiffError::load(origin, "missing header row"));
        }

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = if i == 0 { name.trim_start_matches('\u{feff}') } else { name };
                Column::new(name, i)
            })
            .collect();

        if let Some(dup) = find_duplicate_name(columns.iter().map(|c| c.name.as_str())) {
            return Err(DiffError::load(
                origin,
                format!("duplicate column name \"{}\" in header", dup),
            ));
        }

        let mut table = Table::new(columns);

        for (i, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| DiffError::load(origin, e))?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(i + 2); // +2 for 1-indexing and header

            let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            table.add_row(cells, line);
        }

        Ok(table)
    }
}

/// Classify a raw field as missing, integer, float, or text.
///
/// Integers wider than `i128` and decimals that `f64` cannot hold exactly
/// stay text, so distinct values never collapse into one.
pub fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() || NA_MARKERS.contains(&trimmed) {
        return CellValue::Null;
    }

    if let Ok(i) = trimmed.parse::<i128>() {
        return CellValue::Int(i);
    }

    if looks_numeric(trimmed) && trimmed.contains(['.', 'e', 'E']) {
        if let Ok(f) = trimmed.parse::<f64>() {
            if significant_digits(trimmed) == significant_digits(&format!("{:e}", f)) {
                return CellValue::Float(f);
            }
        }
    }

    CellValue::Text(s.to_string())
}

/// Rust's float parser also accepts words like "inf" and "infinity"; only
/// digit-bearing fields count as numbers here
fn looks_numeric(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}

/// Mantissa digits without leading or trailing zeros
fn significant_digits(s: &str) -> String {
    let mantissa = s.split(['e', 'E']).next().unwrap_or(s);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    digits.trim_matches('0').to_string()
}
