//! Table detection from the text layout of a page.
//!
//! Cells are separated by tabs or by runs of two or more spaces. Laid-out
//! text often keeps only a single space between cells; such a line is split
//! into a leading text cell followed by its trailing tokens that contain a
//! digit. A page holds a table when enough lines split into enough cells;
//! single-cell lines that follow a row are treated as wrapped cell text.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::Table;

lazy_static! {
    static ref CELL_SEPARATOR: Regex = Regex::new(r"\t+|[ \u{00a0}]{2,}").unwrap();
}

/// Text-layout table finder.
#[derive(Debug, Clone)]
pub struct TableFinder {
    /// Minimum cells for a line to count as a table row.
    min_columns: usize,
    /// Minimum number of such rows for a table to exist.
    min_rows: usize,
}

impl TableFinder {
    /// Create a finder with default thresholds.
    pub fn new() -> Self {
        Self {
            min_columns: 3,
            min_rows: 2,
        }
    }

    /// Detect a table in page text.
    pub fn find(&self, text: &str) -> Option<Table> {
        let lines: Vec<Vec<String>> = text
            .lines()
            .map(|line| self.split_cells(line))
            .filter(|cells| !cells.is_empty())
            .collect();

        let wide_rows = lines.iter().filter(|c| c.len() >= self.min_columns).count();
        if wide_rows < self.min_rows {
            debug!("No table: {} of {} lines have {}+ cells", wide_rows, lines.len(), self.min_columns);
            return None;
        }

        let mut table: Table = Vec::new();
        for cells in lines {
            if table.is_empty() && cells.len() < self.min_columns {
                // Title text above the table
                continue;
            }

            if cells.len() == 1 && !starts_with_digit(&cells[0]) {
                if let Some(last) = table.last_mut() {
                    append_continuation(last, &cells[0]);
                    continue;
                }
            }

            table.push(cells.into_iter().map(Some).collect());
        }

        debug!("Detected table with {} rows", table.len());
        Some(table)
    }
}

impl Default for TableFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFinder {
    fn split_cells(&self, line: &str) -> Vec<String> {
        let cells: Vec<String> = CELL_SEPARATOR
            .split(line.trim())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if cells.len() == 1 {
            let split = split_trailing_tokens(&cells[0]);
            if split.len() >= self.min_columns {
                return split;
            }
        }
        cells
    }
}

/// `"Name Co BG123 10 5 2"` -> `["Name Co", "BG123", "10", "5", "2"]`.
fn split_trailing_tokens(line: &str) -> Vec<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let lead = tokens
        .iter()
        .rposition(|t| !t.chars().any(|c| c.is_ascii_digit()))
        .map_or(0, |i| i + 1);

    let mut cells = Vec::with_capacity(tokens.len() - lead + 1);
    if lead > 0 {
        cells.push(tokens[..lead].join(" "));
    }
    cells.extend(tokens[lead..].iter().map(|t| t.to_string()));
    cells
}

fn starts_with_digit(cell: &str) -> bool {
    cell.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn append_continuation(row: &mut [Option<String>], text: &str) {
    if let Some(cell) = row.iter_mut().rev().flatten().next() {
        cell.push('\n');
        cell.push_str(text);
    }
}
