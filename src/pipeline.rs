//! End-to-end comparison: load, diff, normalize, write

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::diff::{DiffEngine, DiffResult};
use crate::error::Result;
use crate::output::{fill_missing, CsvOutput};
use crate::parser::load_table;
use crate::progress::Progress;

/// What a successful run produced
#[derive(Debug)]
pub struct DiffOutcome {
    /// Difference table as written, missing cells already replaced by the
    /// sentinel
    pub result: DiffResult,
    /// Path of the written CSV file
    pub output_path: PathBuf,
}

impl DiffOutcome {
    pub fn has_changes(&self) -> bool {
        self.result.has_changes()
    }
}

/// Compare the two files named in `config` and write `<output_base_name>.csv`.
///
/// Nothing is written unless every stage succeeds.
pub fn compare(config: &Config, progress: &mut dyn Progress) -> Result<DiffOutcome> {
    progress.stage(&format!(
        "Comparing two CSV files:\n  ‣ {}\n  ‣ {}\n  Preserving the \"{}\" column.",
        config.file1.display(),
        config.file2.display(),
        config.id_column
    ));
    let first = load_table(&config.file1, config)?;
    let second = load_table(&config.file2, config)?;
    progress.done(&format!(
        "Loaded {} and {} row(s).",
        first.row_count(),
        second.row_count()
    ));

    let mut result = DiffEngine::new(config.clone()).diff(first, second, progress)?;
    fill_missing(&mut result.table, &config.sentinel);

    let output_path = config.output_path();
    progress.stage(&format!(
        "Exporting final output file to {}.",
        output_path.display()
    ));
    CsvOutput::from_config(config).write_file(&result.table, &output_path)?;
    progress.done(&format!(
        "Successfully exported \"{}\".",
        output_path.display()
    ));

    info!(
        output = %output_path.display(),
        rows = result.table.row_count(),
        columns = result.table.column_count(),
        "comparison finished"
    );
    Ok(DiffOutcome {
        result,
        output_path,
    })
}
