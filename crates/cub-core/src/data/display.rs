//! HTML and plain-text rendering
//!
//! Long tables show only their first and last rows with an ellipsis row in
//! between.

use super::*;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Rows shown from the top of a truncated table
    pub head_rows: usize,
    /// Rows shown from the bottom of a truncated table
    pub tail_rows: usize,
    /// Decimal places for float cells
    pub float_precision: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            head_rows: 10,
            tail_rows: 10,
            float_precision: 3,
        }
    }
}

impl DisplayOptions {
    pub fn with_head_rows(mut self, n: usize) -> Self {
        self.head_rows = n;
        self
    }

    pub fn with_tail_rows(mut self, n: usize) -> Self {
        self.tail_rows = n;
        self
    }

    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    /// Row positions to render; `None` marks the ellipsis row
    fn visible_rows(&self, nrows: usize) -> Vec<Option<usize>> {
        if nrows <= self.head_rows + self.tail_rows {
            return (0..nrows).map(Some).collect();
        }

        (0..self.head_rows)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((nrows - self.tail_rows..nrows).map(Some))
            .collect()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A cell as text, padded the way its column kind is laid out in HTML
fn html_cell(column: &Column, idx: usize, precision: usize) -> String {
    match column {
        Column::Int(arr) => format!("{:>10}", arr[idx]),
        Column::Float(arr) => format!("{:>10.prec$}", arr[idx], prec = precision),
        Column::Bool(arr) => arr[idx].to_string(),
        Column::Object(arr) => {
            let text = arr[idx].as_deref().unwrap_or("None");
            escape_html(&format!("{:<10}", text))
        }
    }
}

/// A cell as bare text
fn text_cell(column: &Column, idx: usize, precision: usize) -> String {
    match column {
        Column::Float(arr) => format!("{:.prec$}", arr[idx], prec = precision),
        other => other.get(idx).map(|v| v.to_string()).unwrap_or_default(),
    }
}

impl DataFrame {
    /// Render as an HTML table with the default options
    pub fn to_html(&self) -> String {
        self.to_html_with(&DisplayOptions::default())
    }

    /// Render as an HTML table
    pub fn to_html_with(&self, options: &DisplayOptions) -> String {
        let mut html = String::from("<table><thead><tr><th></th>");
        for name in self.columns.keys() {
            let _ = write!(html, "<th>{}</th>", escape_html(&format!("{:<10}", name)));
        }
        html.push_str("</tr></thead><tbody>");

        for row in options.visible_rows(self.nrows) {
            match row {
                Some(idx) => {
                    let _ = write!(html, "<tr><td><strong>{}</strong></td>", idx);
                    for column in self.columns.values() {
                        let _ = write!(
                            html,
                            "<td>{}</td>",
                            html_cell(column, idx, options.float_precision)
                        );
                    }
                }
                None => {
                    html.push_str("<tr><td><strong>...</strong></td>");
                    for _ in 0..self.ncols() {
                        html.push_str("<td>...</td>");
                    }
                }
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table>");
        html
    }

    /// Render as a plain-text grid
    pub fn to_text_with(&self, options: &DisplayOptions) -> String {
        let rows = options.visible_rows(self.nrows);

        let label = |row: &Option<usize>| match row {
            Some(idx) => idx.to_string(),
            None => "...".to_string(),
        };

        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.ncols() + 1);
        let mut index = vec![String::new()];
        index.extend(rows.iter().map(label));
        grid.push(index);

        for (name, column) in &self.columns {
            let mut cells = vec![name.clone()];
            cells.extend(rows.iter().map(|row| match row {
                Some(idx) => text_cell(column, *idx, options.float_precision),
                None => "...".to_string(),
            }));
            grid.push(cells);
        }

        let widths: Vec<usize> = grid
            .iter()
            .map(|cells| cells.iter().map(|c| c.chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for line in 0..=rows.len() {
            let cells: Vec<String> = grid
                .iter()
                .zip(&widths)
                .map(|(cells, &width)| format!("{:>width$}", cells[line], width = width))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text_with(&DisplayOptions::default()))
    }
}
