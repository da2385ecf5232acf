//! Diff engine for comparing tables

pub mod cell_diff;
pub mod prune;
mod row_diff;
mod schema_diff;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, Side};
use crate::model::{locate, CellValue, Identifier, Row, Table};
use crate::progress::{Progress, Silent};

pub use cell_diff::CellComparator;
pub use row_diff::{Alignment, RowMatcher};
pub use schema_diff::SchemaDiff;

/// Statistics about the diff
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub first_row_count: usize,
    pub second_row_count: usize,
    pub rows_compared: usize,
    pub rows_with_differences: usize,
    pub cells_changed: usize,
    /// Rows of the first table with no partner (join alignment only)
    pub unmatched_first: usize,
    /// Rows of the second table with no partner (join alignment only)
    pub unmatched_second: usize,
    /// Positional pairs whose identifiers disagree (sort alignment only)
    pub misaligned_rows: usize,
    pub rows_pruned: usize,
    pub columns_pruned: usize,
}

impl DiffStats {
    /// Check if there are any changes; rows present in only one table count
    pub fn has_changes(&self) -> bool {
        self.rows_with_differences > 0 || self.unmatched_first > 0 || self.unmatched_second > 0
    }
}

/// Result of comparing two tables
#[derive(Debug)]
pub struct DiffResult {
    /// Difference table: identifier column plus, per cell, either a missing
    /// value (no difference) or the first table's value
    pub table: Table,
    /// Identifier column and its position in the first table's header
    pub identifier: Identifier,
    /// Statistics
    pub stats: DiffStats,
}

impl DiffResult {
    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.stats.has_changes()
    }
}

/// Main diff engine
pub struct DiffEngine {
    config: Config,
    cell_comparator: CellComparator,
}

impl DiffEngine {
    /// Create a new diff engine with configuration
    pub fn new(config: Config) -> Self {
        let cell_comparator = CellComparator::from_config(&config);
        Self {
            config,
            cell_comparator,
        }
    }

    /// Align, compare and prune two tables
    pub fn diff(
        &self,
        first: Table,
        second: Table,
        progress: &mut dyn Progress,
    ) -> Result<DiffResult> {
        let name = self.config.id_column.as_str();
        let mut stats = DiffStats {
            first_row_count: first.row_count(),
            second_row_count: second.row_count(),
            ..Default::default()
        };

        progress.stage(&format!("Retrieving the column number of \"{}\".", name));
        let identifier = Identifier::resolve(&first, &second, name)?;
        progress.done(&format!(
            "Retrieved. \"{}\" is in column no. {}.",
            name, identifier.position
        ));

        progress.stage(&format!(
            "Aligning rows by \"{}\" ({} alignment, ascending).",
            name, self.config.align
        ));
        let alignment = RowMatcher::new(self.config.align).align(first, second, &identifier)?;
        stats.unmatched_first = alignment.unmatched_first();
        stats.unmatched_second = alignment.unmatched_second;
        stats.misaligned_rows = alignment.misaligned;
        progress.done(&format!("Successfully aligned by \"{}\".", name));

        progress.stage("Comparing differences between both tables.");
        let mut table = self.compare(alignment, &identifier, &mut stats)?;
        progress.done("Comparison completed. Difference table created.");

        if self.config.delete_null_rows {
            progress.stage(&format!(
                "Dropping rows that only contain \"{}\" as a non-null value.",
                name
            ));
            stats.rows_pruned = prune::prune_rows(&mut table);
            progress.done(&format!("Dropped {} row(s).", stats.rows_pruned));
        } else {
            progress.note("Keeping rows without differences (row pruning disabled).");
        }

        if self.config.delete_null_cols {
            progress.stage("Dropping columns that contain only null values.");
            stats.columns_pruned = prune::prune_columns(&mut table, name);
            progress.done(&format!("Dropped {} column(s).", stats.columns_pruned));
        } else {
            progress.note("Keeping columns without differences (column pruning disabled).");
        }

        debug!(?stats, "diff complete");
        Ok(DiffResult {
            table,
            identifier,
            stats,
        })
    }

    /// Build the difference table from aligned rows.
    ///
    /// The identifier is taken out of both tables before comparing and put
    /// back at its original position afterwards.
    fn compare(
        &self,
        alignment: Alignment,
        identifier: &Identifier,
        stats: &mut DiffStats,
    ) -> Result<Table> {
        let Alignment {
            mut first,
            mut second,
            partners,
            ..
        } = alignment;

        let first_col = locate(&first, &identifier.name, Side::First)?;
        let id_values = first.remove_column(first_col);
        let second_col = locate(&second, &identifier.name, Side::Second)?;
        second.remove_column(second_col);

        let mapping = SchemaDiff::column_mapping(&first, &second)?;

        let mut diff = Table::new(first.columns.clone());
        for (row, partner) in first.rows.iter().zip(&partners) {
            let other = partner.map(|p| &second.rows[p]);
            let cells: Vec<CellValue> = row
                .cells
                .iter()
                .enumerate()
                .map(|(j, value)| match other {
                    Some(o) => self.cell_comparator.diff_cell(value, &o.cells[mapping[j]]),
                    None => value.clone(),
                })
                .collect();

            let row = Row::new(cells, row.source_line);
            let changed = row.non_null_count();
            if changed > 0 {
                stats.rows_with_differences += 1;
                stats.cells_changed += changed;
            }
            stats.rows_compared += 1;
            diff.rows.push(row);
        }

        diff.insert_column(identifier.position, identifier.name.clone(), id_values);
        Ok(diff)
    }
}

/// Convenience function to compute diff without narration
pub fn compute_diff(first: Table, second: Table, config: &Config) -> Result<DiffResult> {
    DiffEngine::new(config.clone()).diff(first, second, &mut Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignStrategy;
    use crate::error::DiffError;
    use crate::progress::testing::Recorder;

    fn table(headers: &[&str], rows: &[Vec<CellValue>]) -> Table {
        let mut t = Table::with_headers(headers);
        for (i, cells) in rows.iter().enumerate() {
            t.add_row(cells.clone(), i + 2);
        }
        t
    }

    fn int(i: i128) -> CellValue {
        CellValue::Int(i)
    }

    fn config() -> Config {
        Config::new("a.csv", "b.csv", "id", "out")
    }

    fn column(t: &Table, name: &str) -> Vec<CellValue> {
        let idx = t.column_index(name).unwrap();
        t.column_values(idx).cloned().collect()
    }

    #[test]
    fn test_concrete_scenario() {
        let first = table(&["id", "A"], &[vec![int(2), int(5)], vec![int(1), int(7)]]);
        let second = table(&["id", "A"], &[vec![int(1), int(7)], vec![int(2), int(9)]]);

        let result = compute_diff(first, second, &config()).unwrap();

        assert_eq!(result.table.column_names(), vec!["id", "A"]);
        assert_eq!(column(&result.table, "id"), vec![int(1), int(2)]);
        assert_eq!(column(&result.table, "A"), vec![CellValue::Null, int(5)]);
        assert_eq!(result.stats.rows_with_differences, 1);
        assert_eq!(result.stats.cells_changed, 1);
        assert!(result.has_changes());
    }

    #[test]
    fn test_identifier_reinserted_at_original_position() {
        let first = table(
            &["A", "B", "id"],
            &[vec![int(1), int(2), int(20)], vec![int(3), int(4), int(10)]],
        );
        let second = table(
            &["id", "B", "A"],
            &[vec![int(10), int(4), int(0)], vec![int(20), int(0), int(1)]],
        );

        let result = compute_diff(first, second, &config()).unwrap();

        assert_eq!(result.identifier.position, 2);
        assert_eq!(result.table.column_names(), vec!["A", "B", "id"]);
        assert_eq!(column(&result.table, "id"), vec![int(10), int(20)]);
        assert_eq!(column(&result.table, "A"), vec![int(3), CellValue::Null]);
        assert_eq!(column(&result.table, "B"), vec![CellValue::Null, int(2)]);
    }

    #[test]
    fn test_self_comparison_prunes_to_identifier() {
        let rows = vec![
            vec![int(1), CellValue::from("x"), CellValue::Float(1.5)],
            vec![int(2), CellValue::Null, CellValue::Float(2.5)],
        ];
        let first = table(&["id", "A", "B"], &rows);
        let second = table(&["id", "A", "B"], &rows);

        let config = config()
            .with_delete_null_rows(true)
            .with_delete_null_cols(true);
        let result = compute_diff(first, second, &config).unwrap();

        assert_eq!(result.table.column_names(), vec!["id"]);
        assert_eq!(result.table.row_count(), 0);
        assert_eq!(result.stats.rows_pruned, 2);
        assert_eq!(result.stats.columns_pruned, 2);
        assert!(!result.has_changes());
    }

    #[test]
    fn test_pruning_keeps_informative_rows_and_columns() {
        let first = table(
            &["id", "A", "B"],
            &[vec![int(1), int(1), int(1)], vec![int(2), int(2), int(2)]],
        );
        let second = table(
            &["id", "A", "B"],
            &[vec![int(1), int(1), int(1)], vec![int(2), int(3), int(2)]],
        );

        let config = config()
            .with_delete_null_rows(true)
            .with_delete_null_cols(true);
        let result = compute_diff(first, second, &config).unwrap();

        assert_eq!(result.table.column_names(), vec!["id", "A"]);
        assert_eq!(column(&result.table, "id"), vec![int(2)]);
        assert_eq!(column(&result.table, "A"), vec![int(2)]);
    }

    #[test]
    fn test_missing_identifier_column() {
        let first = table(&["id", "A"], &[vec![int(1), int(1)]]);
        let second = table(&["id", "A"], &[vec![int(1), int(1)]]);
        let config = Config::new("a.csv", "b.csv", "nope", "out");

        let err = compute_diff(first, second, &config).unwrap_err();
        assert!(matches!(err, DiffError::ColumnNotFound { side: Side::First, .. }));
    }

    #[test]
    fn test_disjoint_columns_fail() {
        let first = table(&["id", "A"], &[vec![int(1), int(1)]]);
        let second = table(&["id", "B"], &[vec![int(1), int(1)]]);

        let err = compute_diff(first, second, &config()).unwrap_err();
        assert!(matches!(err, DiffError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_join_surfaces_rows_missing_from_second() {
        let first = table(
            &["id", "A", "B"],
            &[vec![int(1), int(1), CellValue::Null], vec![int(2), int(5), int(6)]],
        );
        let second = table(
            &["id", "A", "B"],
            &[vec![int(1), int(1), CellValue::Null], vec![int(3), int(0), int(0)]],
        );

        let config = config().with_align(AlignStrategy::Join);
        let result = compute_diff(first, second, &config).unwrap();

        assert_eq!(column(&result.table, "A"), vec![CellValue::Null, int(5)]);
        assert_eq!(column(&result.table, "B"), vec![CellValue::Null, int(6)]);
        assert_eq!(result.stats.unmatched_first, 1);
        assert_eq!(result.stats.unmatched_second, 1);
    }

    #[test]
    fn test_join_rows_only_in_second_count_as_changes() {
        let first = table(&["id", "A"], &[vec![int(1), int(1)]]);
        let second = table(&["id", "A"], &[vec![int(1), int(1)], vec![int(2), int(2)]]);

        let config = config().with_align(AlignStrategy::Join);
        let result = compute_diff(first, second, &config).unwrap();

        assert_eq!(column(&result.table, "A"), vec![CellValue::Null]);
        assert_eq!(result.stats.rows_with_differences, 0);
        assert_eq!(result.stats.unmatched_second, 1);
        assert!(result.has_changes());
    }

    #[test]
    fn test_wide_integers_compare_exactly() {
        use crate::parser::parse_cell_value;

        let cells = |id: &str, a: &str| vec![parse_cell_value(id), parse_cell_value(a)];
        let first = table(
            &["id", "A"],
            &[
                cells("12345678901234567892", "98765432109876543210"),
                cells("12345678901234567891", "98765432109876543210"),
            ],
        );
        let second = table(
            &["id", "A"],
            &[
                cells("12345678901234567891", "98765432109876543211"),
                cells("12345678901234567892", "98765432109876543210"),
            ],
        );

        let result = compute_diff(first, second, &config()).unwrap();

        assert_eq!(
            column(&result.table, "id"),
            vec![int(12345678901234567891), int(12345678901234567892)]
        );
        assert_eq!(
            column(&result.table, "A"),
            vec![int(98765432109876543210), CellValue::Null]
        );
        assert_eq!(result.stats.cells_changed, 1);
    }

    #[test]
    fn test_text_identifiers_sorted_lexicographically() {
        let first = table(
            &["sku", "price"],
            &[
                vec!["b-2".into(), int(10)],
                vec!["a-1".into(), int(20)],
            ],
        );
        let second = table(
            &["sku", "price"],
            &[
                vec!["a-1".into(), int(21)],
                vec!["b-2".into(), int(10)],
            ],
        );

        let config = Config::new("a.csv", "b.csv", "sku", "out");
        let result = compute_diff(first, second, &config).unwrap();

        assert_eq!(
            column(&result.table, "sku"),
            vec![CellValue::from("a-1"), CellValue::from("b-2")]
        );
        assert_eq!(column(&result.table, "price"), vec![int(20), CellValue::Null]);
    }

    #[test]
    fn test_narration_sequence() {
        let first = table(&["id", "A"], &[vec![int(1), int(1)]]);
        let second = table(&["id", "A"], &[vec![int(1), int(2)]]);
        let mut recorder = Recorder::default();

        DiffEngine::new(config().with_delete_null_rows(true))
            .diff(first, second, &mut recorder)
            .unwrap();

        let stages: Vec<_> = recorder
            .events
            .iter()
            .filter(|e| e.starts_with("stage: "))
            .collect();
        assert_eq!(stages.len(), 4);
        assert!(stages[0].contains("column number of \"id\""));
        assert!(recorder
            .events
            .last()
            .unwrap()
            .contains("column pruning disabled"));
    }
}
