//! Formatted terminal output.
//!
//! Every string the tool writes to stdout is built here, so the loader and
//! pipeline stay free of printing and output can be asserted as plain text.

use crate::app::pipeline::PreviewOutcome;
use crate::config::PreviewConfig;
use crate::domain::{ColumnValues, SalesTable, TableShape};

pub const LOADED_MESSAGE: &str = "Loaded processed daily sales data.";
pub const MISSING_MESSAGE: &str = "Processed sales data not found. Please run preprocessing notebooks first.";
pub const PREVIEW_HEADING: &str = "Preview:";

const MISSING_CELL: &str = "NaN";
const COLUMN_GAP: &str = "  ";

/// Full stdout text for a completed run, closing pointer included.
pub fn format_outcome(outcome: &PreviewOutcome, config: &PreviewConfig) -> String {
    let mut out = String::new();

    match outcome {
        PreviewOutcome::Loaded { shape, head } => {
            out.push_str(LOADED_MESSAGE);
            out.push('\n');
            out.push_str(&format_shape(*shape));
            out.push('\n');
            out.push_str(PREVIEW_HEADING);
            out.push('\n');
            out.push_str(&format_preview(head));
        }
        PreviewOutcome::Missing { .. } => {
            out.push_str(MISSING_MESSAGE);
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&format_notebooks_pointer(&config.notebooks_dir));
    out.push('\n');

    out
}

pub fn format_shape(shape: TableShape) -> String {
    format!("Shape: {shape}")
}

pub fn format_notebooks_pointer(notebooks_dir: &str) -> String {
    format!("For detailed analysis and forecasting, check the {notebooks_dir} directory.")
}

/// Render a table as aligned text: header, divider, one line per row.
///
/// The index is left-aligned, numeric columns right-aligned, text left-aligned.
pub fn format_preview(table: &SalesTable) -> String {
    let date_only = table.index_is_date_only();

    let mut cols: Vec<TextColumn> = Vec::with_capacity(table.columns.len() + 1);
    cols.push(TextColumn {
        header: table.index_name.clone(),
        cells: table
            .index
            .iter()
            .map(|ts| {
                if date_only {
                    ts.format("%Y-%m-%d").to_string()
                } else {
                    ts.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            })
            .collect(),
        right_align: false,
    });
    for column in &table.columns {
        cols.push(TextColumn {
            header: column.name.clone(),
            cells: format_cells(&column.values),
            right_align: column.values.is_numeric(),
        });
    }

    let widths: Vec<usize> = cols.iter().map(TextColumn::width).collect();
    let mut out = String::new();

    push_line(&mut out, cols.iter().zip(&widths).map(|(c, &w)| pad(&c.header, w, c.right_align)));
    push_line(&mut out, widths.iter().map(|&w| "-".repeat(w)));
    for row in 0..table.index.len() {
        push_line(
            &mut out,
            cols.iter()
                .zip(&widths)
                .map(|(c, &w)| pad(&c.cells[row], w, c.right_align)),
        );
    }

    out
}

struct TextColumn {
    header: String,
    cells: Vec<String>,
    right_align: bool,
}

impl TextColumn {
    fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.chars().count())
            .chain(std::iter::once(self.header.chars().count()))
            .max()
            .unwrap_or(0)
    }
}

fn push_line(out: &mut String, parts: impl Iterator<Item = String>) {
    let line = parts.collect::<Vec<_>>().join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

fn pad(s: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{s:>width$}")
    } else {
        format!("{s:<width$}")
    }
}

fn format_cells(values: &ColumnValues) -> Vec<String> {
    match values {
        ColumnValues::Int(v) => v
            .iter()
            .map(|c| c.map(|x| x.to_string()).unwrap_or_else(|| MISSING_CELL.to_string()))
            .collect(),
        ColumnValues::Float(v) => v
            .iter()
            .map(|c| c.map(fmt_float).unwrap_or_else(|| MISSING_CELL.to_string()))
            .collect(),
        ColumnValues::Text(v) => v
            .iter()
            .map(|c| c.clone().unwrap_or_else(|| MISSING_CELL.to_string()))
            .collect(),
    }
}

/// Whole floats keep one decimal (`12.0`) so they read as floats. Magnitudes
/// past f64's exact-integer range use exponent form so they never pass for an
/// exact integer.
fn fmt_float(v: f64) -> String {
    if v.is_finite() && v.abs() >= 1e15 {
        format!("{v:e}")
    } else if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
