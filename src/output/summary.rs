//! End-of-run summary

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::diff::DiffStats;

#[derive(Serialize)]
struct JsonSummary<'a> {
    output: String,
    has_differences: bool,
    #[serde(flatten)]
    stats: &'a DiffStats,
}

/// Print the statistics of a run as plain text
pub fn write_text(stats: &DiffStats, output: &Path, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "Output:    {}", output.display())?;
    writeln!(
        writer,
        "Rows:      {} compared ({} in first, {} in second)",
        stats.rows_compared, stats.first_row_count, stats.second_row_count
    )?;
    writeln!(
        writer,
        "Differing: {} row(s), {} cell(s)",
        stats.rows_with_differences, stats.cells_changed
    )?;
    if stats.unmatched_first > 0 || stats.unmatched_second > 0 {
        writeln!(
            writer,
            "Unmatched: {} in first, {} in second",
            stats.unmatched_first, stats.unmatched_second
        )?;
    }
    if stats.misaligned_rows > 0 {
        writeln!(
            writer,
            "Misaligned: {} row pair(s) with different identifiers",
            stats.misaligned_rows
        )?;
    }
    if stats.rows_pruned > 0 || stats.columns_pruned > 0 {
        writeln!(
            writer,
            "Pruned:    {} row(s), {} column(s)",
            stats.rows_pruned, stats.columns_pruned
        )?;
    }
    Ok(())
}

/// Print the statistics of a run as a JSON object
pub fn write_json(stats: &DiffStats, output: &Path, writer: &mut dyn Write) -> Result<()> {
    let summary = JsonSummary {
        output: output.display().to_string(),
        has_differences: stats.has_changes(),
        stats,
    };
    serde_json::to_writer_pretty(&mut *writer, &summary)?;
    writeln!(writer)?;
    Ok(())
}
