//! celldiff - Cell-level diff for tabular data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use celldiff::config::{AlignStrategy, Config};
use celldiff::output::{summary, ConsoleReporter, TerminalOutput};
use celldiff::pipeline::compare;
use celldiff::progress::{Progress, Silent};

/// Cell-level diff of two CSV files aligned on an identifier column
#[derive(Parser, Debug)]
#[command(name = "celldiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First file; differing values are reported from this file
    file1: PathBuf,

    /// Second file
    file2: PathBuf,

    /// Identifier column present in both files
    #[arg(short, long = "id", value_name = "COLUMN")]
    id: String,

    /// Output file name without extension (".csv" is appended)
    #[arg(short, long, value_name = "BASE_NAME")]
    output: String,

    /// Drop rows in which only the identifier is non-empty
    #[arg(long)]
    delete_null_rows: bool,

    /// Drop columns in which every cell is empty
    #[arg(long)]
    delete_null_cols: bool,

    /// How rows of the two files are paired: "sort" or "join"
    #[arg(long, default_value = "sort", value_name = "STRATEGY")]
    align: AlignStrategy,

    /// Placeholder written for cells without a difference
    #[arg(long, default_value = ".")]
    sentinel: String,

    /// Field delimiter for input and output (single ASCII character, or "tab")
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Tolerance for numeric comparisons (e.g., 0.001)
    #[arg(long)]
    numeric_tolerance: Option<f64>,

    /// Ignore case when comparing text values
    #[arg(long)]
    ignore_case: bool,

    /// Ignore leading/trailing whitespace in text values
    #[arg(long)]
    ignore_whitespace: bool,

    /// Print the difference table to stdout
    #[arg(long)]
    preview: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Suppress stage narration on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", s)),
    }
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(has_changes) => {
            if has_changes {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut config = Config::new(&cli.file1, &cli.file2, cli.id, cli.output)
        .with_delete_null_rows(cli.delete_null_rows)
        .with_delete_null_cols(cli.delete_null_cols)
        .with_align(cli.align)
        .with_sentinel(cli.sentinel)
        .with_delimiter(cli.delimiter)
        .with_ignore_case(cli.ignore_case)
        .with_ignore_whitespace(cli.ignore_whitespace);
    if let Some(tolerance) = cli.numeric_tolerance {
        config = config.with_numeric_tolerance(tolerance);
    }

    let mut progress: Box<dyn Progress> = if cli.quiet {
        Box::new(Silent)
    } else {
        Box::new(ConsoleReporter::default())
    };

    let outcome = match compare(&config, progress.as_mut()) {
        Ok(outcome) => outcome,
        Err(e) => {
            if e.is_comparison_error() {
                progress.failed("The comparison did not complete; no output file was written.");
            } else {
                progress.failed("A file could not be read or written; no output file was written.");
            }
            return Err(e).with_context(|| {
                format!(
                    "Failed to compare {} with {}",
                    config.file1.display(),
                    config.file2.display()
                )
            });
        }
    };
    progress.done("The comparison program has completed.");

    let mut stdout = std::io::stdout().lock();
    if cli.preview {
        TerminalOutput::new(config.sentinel.as_str())
            .render(&outcome.result.table, &mut stdout)?;
    }
    if cli.json {
        summary::write_json(&outcome.result.stats, &outcome.output_path, &mut stdout)?;
    } else {
        summary::write_text(&outcome.result.stats, &outcome.output_path, &mut stdout)?;
    }

    Ok(outcome.has_changes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter("::").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_align_argument() {
        let args = ["celldiff", "a.csv", "b.csv", "-i", "id", "-o", "out"];
        assert_eq!(Cli::try_parse_from(args).unwrap().align, AlignStrategy::Sort);

        let args = ["celldiff", "a.csv", "b.csv", "-i", "id", "-o", "out", "--align", "JOIN"];
        assert_eq!(Cli::try_parse_from(args).unwrap().align, AlignStrategy::Join);

        let args = ["celldiff", "a.csv", "b.csv", "-i", "id", "-o", "out", "--align", "merge"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
