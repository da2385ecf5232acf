//! Configuration handling for celldiff

use std::path::PathBuf;

/// How rows of the two tables are paired up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignStrategy {
    /// Sort both tables by identifier and pair rows by position
    #[default]
    Sort,
    /// Sort the first table and look up partners in the second by identifier
    Join,
}

impl std::str::FromStr for AlignStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sort" => Ok(AlignStrategy::Sort),
            "join" => Ok(AlignStrategy::Join),
            _ => Err(format!("Unknown alignment strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for AlignStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignStrategy::Sort => write!(f, "sort"),
            AlignStrategy::Join => write!(f, "join"),
        }
    }
}

/// Placeholder written for cells that show no difference
pub const DEFAULT_SENTINEL: &str = ".";

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the first table; differing values are taken from here
    pub file1: PathBuf,
    /// Path to the second table
    pub file2: PathBuf,
    /// Column holding the row identifier in both tables
    pub id_column: String,
    /// Output file name without the `.csv` extension
    pub output_base_name: String,
    /// Drop rows where only the identifier is non-missing
    pub delete_null_rows: bool,
    /// Drop columns where every cell is missing
    pub delete_null_cols: bool,
    /// Row pairing strategy
    pub align: AlignStrategy,
    /// Text written in place of missing cells
    pub sentinel: String,
    /// Field delimiter for input and output
    pub delimiter: u8,
    /// Tolerance for numeric comparisons
    pub numeric_tolerance: Option<f64>,
    /// Ignore case when comparing text values
    pub ignore_case: bool,
    /// Ignore leading/trailing whitespace in text values
    pub ignore_whitespace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file1: PathBuf::new(),
            file2: PathBuf::new(),
            id_column: String::new(),
            output_base_name: String::new(),
            delete_null_rows: false,
            delete_null_cols: false,
            align: AlignStrategy::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            delimiter: b',',
            numeric_tolerance: None,
            ignore_case: false,
            ignore_whitespace: false,
        }
    }
}

impl Config {
    /// Create a new Config with the four required parameters
    pub fn new(
        file1: impl Into<PathBuf>,
        file2: impl Into<PathBuf>,
        id_column: impl Into<String>,
        output_base_name: impl Into<String>,
    ) -> Self {
        Self {
            file1: file1.into(),
            file2: file2.into(),
            id_column: id_column.into(),
            output_base_name: output_base_name.into(),
            ..Default::default()
        }
    }

    /// Path of the file the difference table is written to
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.csv", self.output_base_name))
    }

    pub fn with_delete_null_rows(mut self, delete: bool) -> Self {
        self.delete_null_rows = delete;
        self
    }

    pub fn with_delete_null_cols(mut self, delete: bool) -> Self {
        self.delete_null_cols = delete;
        self
    }

    /// Set the row pairing strategy
    pub fn with_align(mut self, align: AlignStrategy) -> Self {
        self.align = align;
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set numeric tolerance for float comparisons
    pub fn with_numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = Some(tolerance);
        self
    }

    /// Enable case-insensitive comparison
    pub fn with_ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    /// Enable whitespace-insensitive comparison
    pub fn with_ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }
}
