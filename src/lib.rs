//! celldiff - Cell-level diff for tabular data
//!
//! Compares two CSV files that share an identifier column and writes a third
//! file in which every cell is either a placeholder (no difference) or the
//! first file's value where the two disagree.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod progress;

pub use config::{AlignStrategy, Config};
pub use diff::{compute_diff, DiffResult, DiffStats};
pub use error::{DiffError, Result};
pub use model::Table;
pub use pipeline::{compare, DiffOutcome};
pub use progress::{Progress, Silent};
