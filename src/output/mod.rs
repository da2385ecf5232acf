//! Output formatting for the difference table

pub mod console;
mod csv;
pub mod summary;
mod terminal;

pub use self::console::ConsoleReporter;
pub use self::csv::{fill_missing, CsvOutput};
pub use self::terminal::TerminalOutput;
