//! Box-drawn preview of the difference table

use std::io::Write;

use anyhow::Result;

use crate::model::Table;

/// Renders a table to the terminal without eliding rows or columns
pub struct TerminalOutput {
    missing: String,
}

impl TerminalOutput {
    pub fn new(missing: impl Into<String>) -> Self {
        Self {
            missing: missing.into(),
        }
    }

    pub fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut data: Vec<Vec<String>> = Vec::with_capacity(table.row_count() + 1);
        data.push(table.columns.iter().map(|c| c.name.clone()).collect());
        for row in &table.rows {
            data.push(
                row.cells
                    .iter()
                    .map(|c| c.render(&self.missing).into_owned())
                    .collect(),
            );
        }

        write!(writer, "{}", build_table(&data))?;
        if table.row_count() == 0 {
            writeln!(writer, "(no rows)")?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SENTINEL)
    }
}

/// Build a formatted table from data; the first row is the header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let col_count = data[0].len();

    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let border = |left: char, mid: char, right: char| {
        let mut line = String::new();
        line.push(left);
        for (i, width) in col_widths.iter().enumerate() {
            line.push_str(&"─".repeat(*width + 2));
            if i < col_widths.len() - 1 {
                line.push(mid);
            }
        }
        line.push(right);
        line.push('\n');
        line
    };

    let line = |row: &[String]| {
        let mut line = String::from("│");
        for (i, cell) in row.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            line.push_str(&format!(" {:width$} │", cell, width = width));
        }
        line.push('\n');
        line
    };

    let mut output = border('┌', '┬', '┐');
    output.push_str(&line(&data[0]));
    output.push_str(&border('├', '┼', '┤'));
    for row in data.iter().skip(1) {
        output.push_str(&line(row));
    }
    output.push_str(&border('└', '┴', '┘'));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_render_table() {
        let mut t = Table::with_headers(&["id", "Price"]);
        t.add_row(vec![CellValue::Int(1), CellValue::Null], 2);
        t.add_row(vec![CellValue::Int(22), CellValue::Float(5.5)], 3);

        let mut buf = Vec::new();
        TerminalOutput::default().render(&t, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let expected = "\
┌────┬───────┐
│ id │ Price │
├────┼───────┤
│ 1  │ .     │
│ 22 │ 5.5   │
└────┴───────┘
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_empty_table() {
        let t = Table::with_headers(&["id"]);
        let mut buf = Vec::new();
        TerminalOutput::default().render(&t, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("(no rows)\n"));
    }
}
