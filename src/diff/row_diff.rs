//! Row alignment between the two tables

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::config::AlignStrategy;
use crate::error::{DiffError, Result, Side};
use crate::model::{locate, Identifier, Table};

/// Two tables with their rows paired up
#[derive(Debug)]
pub struct Alignment {
    /// First table, sorted ascending by identifier
    pub first: Table,
    /// Second table; sorted by identifier under [`AlignStrategy::Sort`]
    pub second: Table,
    /// For each row of `first`, the index of its partner row in `second`
    pub partners: Vec<Option<usize>>,
    /// Rows of `second` that no row of `first` was paired with
    pub unmatched_second: usize,
    /// Positional pairs whose identifiers disagree
    pub misaligned: usize,
}

impl Alignment {
    /// Rows of `first` without a partner
    pub fn unmatched_first(&self) -> usize {
        self.partners.iter().filter(|p| p.is_none()).count()
    }
}

/// Pairs rows of two tables by identifier
pub struct RowMatcher {
    strategy: AlignStrategy,
}

impl RowMatcher {
    pub fn new(strategy: AlignStrategy) -> Self {
        Self { strategy }
    }

    /// Validate identifiers in both tables, then pair their rows
    pub fn align(&self, first: Table, second: Table, id: &Identifier) -> Result<Alignment> {
        id.validate(&first, Side::First)?;
        id.validate(&second, Side::Second)?;

        match self.strategy {
            AlignStrategy::Sort => Self::align_sorted(first, second, id),
            AlignStrategy::Join => Self::align_joined(first, second, id),
        }
    }

    fn align_sorted(mut first: Table, mut second: Table, id: &Identifier) -> Result<Alignment> {
        let first_col = locate(&first, &id.name, Side::First)?;
        let second_col = locate(&second, &id.name, Side::Second)?;

        first.sort_by_column(first_col);
        second.sort_by_column(second_col);

        if first.row_count() != second.row_count() {
            return Err(DiffError::RowCountMismatch {
                first: first.row_count(),
                second: second.row_count(),
            });
        }

        let mut misaligned = 0;
        for (a, b) in first.column_values(first_col).zip(second.column_values(second_col)) {
            if a != b {
                if misaligned == 0 {
                    warn!(first = %a, second = %b, "identifiers disagree after sorting");
                }
                misaligned += 1;
            }
        }
        if misaligned > 0 {
            warn!(
                pairs = misaligned,
                "tables hold different identifier sets; rows are paired by position"
            );
        }

        let partners = (0..first.row_count()).map(Some).collect();
        Ok(Alignment {
            first,
            second,
            partners,
            unmatched_second: 0,
            misaligned,
        })
    }

    fn align_joined(mut first: Table, second: Table, id: &Identifier) -> Result<Alignment> {
        let first_col = locate(&first, &id.name, Side::First)?;
        let second_col = locate(&second, &id.name, Side::Second)?;

        first.sort_by_column(first_col);

        let partners: Vec<Option<usize>> = {
            let index: FxHashMap<_, usize> = second
                .column_values(second_col)
                .enumerate()
                .map(|(i, v)| (v, i))
                .collect();

            first
                .column_values(first_col)
                .map(|v| index.get(v).copied())
                .collect()
        };

        let matched = partners.iter().filter(|p| p.is_some()).count();
        let unmatched_second = second.row_count() - matched;
        debug!(
            matched,
            unmatched_first = first.row_count() - matched,
            unmatched_second,
            "joined rows on identifier"
        );
        if unmatched_second > 0 {
            warn!(
                rows = unmatched_second,
                "rows only present in the second table are not reported"
            );
        }

        Ok(Alignment {
            first,
            second,
            partners,
            unmatched_second,
            misaligned: 0,
        })
    }
}
