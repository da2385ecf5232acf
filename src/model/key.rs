//! Identifier column handling

use rustc_hash::FxHashMap;

use crate::error::{DiffError, Result, Side};

use super::table::{CellValue, Table};

/// Zero-based position of `name` in the table's header
pub fn locate(table: &Table, name: &str, side: Side) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| DiffError::ColumnNotFound {
            column: name.to_string(),
            side,
        })
}

/// The identifier column shared by both tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Column name, identical in both headers
    pub name: String,
    /// Position in the first table's original header
    pub position: usize,
}

impl Identifier {
    /// Locate the identifier in both tables.
    ///
    /// Must be called before either table is reordered or has columns
    /// removed, since `position` is where the column is put back in the
    /// output.
    pub fn resolve(first: &Table, second: &Table, name: &str) -> Result<Self> {
        let position = locate(first, name, Side::First)?;
        locate(second, name, Side::Second)?;
        Ok(Self {
            name: name.to_string(),
            position,
        })
    }

    /// Check that every row carries an identifier and no identifier repeats
    pub fn validate(&self, table: &Table, side: Side) -> Result<()> {
        let col = locate(table, &self.name, side)?;
        let mut seen: FxHashMap<&CellValue, usize> = FxHashMap::default();

        for row in &table.rows {
            let value = match row.get(col) {
                Some(v) if !v.is_null() => v,
                _ => {
                    return Err(DiffError::MissingIdentifier {
                        side,
                        line: row.source_line,
                    })
                }
            };

            if let Some(&first_line) = seen.get(value) {
                return Err(DiffError::DuplicateIdentifier {
                    value: value.to_string(),
                    side,
                    first_line,
                    second_line: row.source_line,
                });
            }
            seen.insert(value, row.source_line);
        }

        Ok(())
    }
}
