//! Cell-level comparison logic

use crate::config::Config;
use crate::model::CellValue;

/// Cell comparator with configurable options
#[derive(Debug, Clone, Default)]
pub struct CellComparator {
    ignore_case: bool,
    ignore_whitespace: bool,
    numeric_tolerance: Option<f64>,
}

impl CellComparator {
    /// Create a new cell comparator
    pub fn new(ignore_case: bool, ignore_whitespace: bool, numeric_tolerance: Option<f64>) -> Self {
        Self {
            ignore_case,
            ignore_whitespace,
            numeric_tolerance,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.ignore_case,
            config.ignore_whitespace,
            config.numeric_tolerance,
        )
    }

    /// Compare two cell values for equality
    pub fn equal(&self, a: &CellValue, b: &CellValue) -> bool {
        if a == b {
            return true;
        }

        if let Some(tolerance) = self.numeric_tolerance {
            if a.equals_with_tolerance(b, tolerance) {
                return true;
            }
        }

        if self.ignore_case && self.ignore_whitespace {
            if let (CellValue::Text(x), CellValue::Text(y)) = (a, b) {
                return x.trim().to_lowercase() == y.trim().to_lowercase();
            }
        }

        (self.ignore_case && a.equals_ignore_case(b))
            || (self.ignore_whitespace && a.equals_ignore_whitespace(b))
    }

    /// The diff cell for a pair: missing when equal, otherwise the first value
    pub fn diff_cell(&self, first: &CellValue, second: &CellValue) -> CellValue {
        if self.equal(first, second) {
            CellValue::Null
        } else {
            first.clone()
        }
    }
}
