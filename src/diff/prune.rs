//! Removal of rows and columns that carry no differences

use crate::model::Table;

/// A row needs at least this many non-missing cells (identifier included) to
/// be kept by row pruning
pub const MIN_NON_NULL_CELLS: usize = 2;

/// Drop rows with fewer than [`MIN_NON_NULL_CELLS`] non-missing cells.
///
/// Returns the number of rows removed.
pub fn prune_rows(table: &mut Table) -> usize {
    let before = table.row_count();
    table
        .rows
        .retain(|row| row.non_null_count() >= MIN_NON_NULL_CELLS);
    before - table.row_count()
}

/// Drop columns in which every cell is missing, except `keep`.
///
/// Returns the number of columns removed.
pub fn prune_columns(table: &mut Table, keep: &str) -> usize {
    let empty: Vec<bool> = (0..table.column_count())
        .map(|i| table.column_values(i).all(|v| v.is_null()))
        .collect();

    let before = table.column_count();
    table.retain_columns(|i, col| col.name == keep || !empty[i]);
    before - table.column_count()
}
