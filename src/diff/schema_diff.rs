//! Column set comparison

use rustc_hash::FxHashMap;

use crate::error::{DiffError, Result};
use crate::model::Table;

/// Schema comparison between two tables with the identifier already removed
pub struct SchemaDiff;

impl SchemaDiff {
    /// Map each column of `first` to the position of the same-named column in
    /// `second`.
    ///
    /// The column sets must be identical; their order may differ.
    pub fn column_mapping(first: &Table, second: &Table) -> Result<Vec<usize>> {
        let second_positions: FxHashMap<&str, usize> = second
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.index))
            .collect();

        let missing: Vec<String> = first
            .columns
            .iter()
            .filter(|c| !second_positions.contains_key(c.name.as_str()))
            .map(|c| c.name.clone())
            .collect();

        let extra: Vec<String> = second
            .columns
            .iter()
            .filter(|c| first.column_index(&c.name).is_none())
            .map(|c| c.name.clone())
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            return Err(DiffError::ShapeMismatch { missing, extra });
        }

        Ok(first
            .columns
            .iter()
            .map(|c| second_positions[c.name.as_str()])
            .collect())
    }
}
