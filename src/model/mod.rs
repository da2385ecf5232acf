//! Data model for tabular data representation

mod key;
mod schema;
mod table;

pub use key::{locate, Identifier};
pub use schema::{find_duplicate_name, Column};
pub use table::{CellValue, Row, Table};
