//! Table, Row, and Cell data structures

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::schema::Column;

static MISSING: CellValue = CellValue::Null;

/// A single cell: a number, a piece of text, or missing
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Int(i128),
    Float(f64),
    Text(String),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Int and Float share a hash space so that 1 and 1.0 land together
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Int(i) => {
                1u8.hash(state);
                numeric_bits(*i as f64).hash(state);
            }
            CellValue::Float(f) => {
                1u8.hash(state);
                numeric_bits(*f).hash(state);
            }
            CellValue::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
        }
    }
}

/// Bit pattern of a float with -0.0 folded onto 0.0 and all NaNs folded together
fn numeric_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl CellValue {
    /// Check if the value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Ascending order used when sorting by identifier.
    ///
    /// Numbers compare numerically and sort before text; text compares
    /// lexicographically; missing values sort last.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        fn rank(v: &CellValue) -> u8 {
            match v {
                CellValue::Int(_) | CellValue::Float(_) => 0,
                CellValue::Text(_) => 1,
                CellValue::Null => 2,
            }
        }

        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => rank(a).cmp(&rank(b)),
            },
        }
    }

    /// Compare with numeric tolerance
    pub fn equals_with_tolerance(&self, other: &Self, tolerance: f64) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() <= tolerance,
            _ => self == other,
        }
    }

    /// Compare ignoring case (for text)
    pub fn equals_ignore_case(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => self == other,
        }
    }

    /// Compare ignoring whitespace (for text)
    pub fn equals_ignore_whitespace(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.trim() == b.trim(),
            _ => self == other,
        }
    }

    /// Render the value as it is written to a CSV field, with `missing`
    /// standing in for null cells
    pub fn render<'a>(&'a self, missing: &'a str) -> std::borrow::Cow<'a, str> {
        use std::borrow::Cow;
        match self {
            CellValue::Null => Cow::Borrowed(missing),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(""))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i.into())
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line number in source file (1-indexed, header is line 1)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Number of cells that are not missing
    pub fn non_null_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_null()).count()
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column definitions, in header order
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from header names
    pub fn with_headers<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| Column::new(n.as_ref(), i))
                .collect(),
        )
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        debug_assert_eq!(cells.len(), self.column_count());
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |r| r.get(index).unwrap_or(&MISSING))
    }

    /// Sort rows ascending by the values of a column
    pub fn sort_by_column(&mut self, col_idx: usize) {
        self.rows.sort_unstable_by(|a, b| {
            let va = a.get(col_idx).unwrap_or(&MISSING);
            let vb = b.get(col_idx).unwrap_or(&MISSING);
            va.sort_cmp(vb)
        });
    }

    /// Insert a column at `index`, taking one value per row
    pub fn insert_column(&mut self, index: usize, name: impl Into<String>, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.row_count());
        self.columns.insert(index, Column::new(name, index));
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.cells.insert(index, value);
        }
        self.reindex_columns();
    }

    /// Remove the column at `index` and return its values
    pub fn remove_column(&mut self, index: usize) -> Vec<CellValue> {
        self.columns.remove(index);
        let values = self
            .rows
            .iter_mut()
            .map(|row| row.cells.remove(index))
            .collect();
        self.reindex_columns();
        values
    }

    /// Keep only the columns for which `keep` returns true
    pub fn retain_columns<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, &Column) -> bool,
    {
        let mask: Vec<bool> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| keep(i, c))
            .collect();

        let mut it = mask.iter();
        self.columns.retain(|_| *it.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut it = mask.iter();
            row.cells.retain(|_| *it.next().unwrap_or(&true));
        }
        self.reindex_columns();
    }

    fn reindex_columns(&mut self) {
        for (i, col) in self.columns.iter_mut().enumerate() {
            col.index = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(v: &CellValue) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    fn table() -> Table {
        let mut t = Table::with_headers(&["id", "A", "B"]);
        t.add_row(vec![CellValue::Int(2), CellValue::Int(5), "x".into()], 2);
        t.add_row(vec![CellValue::Int(1), CellValue::Int(7), CellValue::Null], 3);
        t
    }

    #[test]
    fn test_cross_type_numeric_equality() {
        assert_eq!(CellValue::Int(1), CellValue::Float(1.0));
        assert_eq!(hash_of(&CellValue::Int(1)), hash_of(&CellValue::Float(1.0)));
        assert_eq!(hash_of(&CellValue::Float(0.0)), hash_of(&CellValue::Float(-0.0)));
        assert_ne!(CellValue::Int(1), CellValue::from("1"));
        assert_eq!(CellValue::Null, CellValue::Null);
    }

    #[test]
    fn test_sort_order() {
        let mut values = vec![
            CellValue::from("b"),
            CellValue::Null,
            CellValue::Float(2.5),
            CellValue::from("a"),
            CellValue::Int(3),
            CellValue::Int(-1),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(
            values,
            vec![
                CellValue::Int(-1),
                CellValue::Float(2.5),
                CellValue::Int(3),
                CellValue::from("a"),
                CellValue::from("b"),
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn test_sort_by_column() {
        let mut t = table();
        t.sort_by_column(0);
        let ids: Vec<_> = t.column_values(0).cloned().collect();
        assert_eq!(ids, vec![CellValue::Int(1), CellValue::Int(2)]);
        assert_eq!(t.rows[0].source_line, 3);
    }

    #[test]
    fn test_remove_and_insert_column() {
        let mut t = table();
        let ids = t.remove_column(0);
        assert_eq!(t.column_names(), vec!["A", "B"]);
        assert_eq!(t.columns[0].index, 0);

        t.insert_column(1, "id", ids);
        assert_eq!(t.column_names(), vec!["A", "id", "B"]);
        assert_eq!(t.columns[2].index, 2);
        assert_eq!(t.rows[0].cells[1], CellValue::Int(2));
    }

    #[test]
    fn test_retain_columns() {
        let mut t = table();
        t.retain_columns(|_, c| c.name != "A");
        assert_eq!(t.column_names(), vec!["id", "B"]);
        assert_eq!(t.rows[1].cells, vec![CellValue::Int(1), CellValue::Null]);
    }

    #[test]
    fn test_render() {
        assert_eq!(CellValue::Null.render("."), ".");
        assert_eq!(CellValue::Float(5.0).render("."), "5");
        assert_eq!(CellValue::Float(2.25).render("."), "2.25");
        assert_eq!(CellValue::from(" padded ").render("."), " padded ");
        assert_eq!(
            CellValue::Int(12345678901234567891).render("."),
            "12345678901234567891"
        );
    }

    #[test]
    fn test_wide_integers_stay_distinct() {
        let a = CellValue::Int(12345678901234567891);
        let b = CellValue::Int(12345678901234567892);
        assert_ne!(a, b);
        assert_eq!(a.sort_cmp(&b), Ordering::Less);
        assert_eq!(CellValue::Int(3).sort_cmp(&a), Ordering::Less);
    }
}
