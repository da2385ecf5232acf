//! Loader for delimited-text tables

mod csv;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::model::Table;

pub use self::csv::{parse_cell_value, CsvParser};

/// Load a table from `path` using the delimiter from `config`
pub fn load_table(path: &Path, config: &Config) -> Result<Table> {
    CsvParser::new(config.delimiter).parse(path)
}
