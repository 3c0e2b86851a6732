//! # ASCII Table Formatter
//!
//! Renders query results and special-command results as MySQL-style ASCII
//! tables.
//!
//! ## Output Format
//!
//! ```text
//! +----+-------+
//! | id | name  |
//! +----+-------+
//! | 1  | Alice |
//! | 2  | Bob   |
//! +----+-------+
//! ```
//!
//! ## Special Results
//!
//! `render_special` lays out a whole `SpecialResult`: the title, then the
//! rows, then the footer. Rows with column headers become a table; rows
//! with an empty header list (the status report) become a key/value block
//! with the labels padded to a common width:
//!
//! ```text
//! Connection id:    7
//! Current database: app
//! ```
//!
//! A result without headers renders only its footer.
//!
//! ## Column Width Calculation
//!
//! Column widths are the maximum of the header length and the longest value
//! in the column, counted in chars and capped at `MAX_COLUMN_WIDTH` (longer
//! cells are truncated with "...").

use crate::config::{BLOB_PREVIEW_BYTES, MAX_COLUMN_WIDTH};
use crate::special::SpecialResult;
use crate::types::{Row, Value};
use std::fmt::Write;

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    pub fn new(headers: Vec<String>, rows: &[Row]) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h).max(1)).collect();

        let formatted_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.values
                    .iter()
                    .enumerate()
                    .map(|(i, val)| {
                        let formatted = format_value(val);
                        if i < widths.len() {
                            widths[i] =
                                widths[i].max(display_width(&formatted)).min(MAX_COLUMN_WIDTH);
                        }
                        formatted
                    })
                    .collect()
            })
            .collect();

        Self {
            headers,
            widths,
            rows: formatted_rows,
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_header_row(&mut output);
        self.write_separator(&mut output);

        for row in &self.rows {
            self.write_data_row(&mut output, row);
        }

        self.write_separator(&mut output);

        output
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            for _ in 0..(*width + 2) {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_header_row(&self, output: &mut String) {
        output.push('|');
        for (i, header) in self.headers.iter().enumerate() {
            let width = self.widths.get(i).copied().unwrap_or(1);
            let _ = write!(output, " {:<width$} |", truncate(header, width), width = width);
        }
        output.push('\n');
    }

    fn write_data_row(&self, output: &mut String, row: &[String]) {
        output.push('|');
        for (i, value) in row.iter().enumerate().take(self.widths.len()) {
            let width = self.widths[i];
            let _ = write!(output, " {:<width$} |", truncate(value, width), width = width);
        }
        output.push('\n');
    }
}

pub fn render_special(mut result: SpecialResult) -> String {
    let mut output = String::new();

    if let Some(title) = result.title.as_deref().filter(|t| !t.is_empty()) {
        output.push_str(title);
        output.push('\n');
    }

    let rows = result.take_rows();
    match result.headers.take() {
        Some(headers) if !headers.is_empty() => {
            output.push_str(&TableFormatter::new(headers, &rows).render());
        }
        Some(_) => output.push_str(&render_key_values(&rows)),
        None => {}
    }

    if let Some(footer) = result.footer.as_deref().filter(|f| !f.is_empty()) {
        output.push_str(footer);
        output.push('\n');
    }

    output
}

fn render_key_values(rows: &[Row]) -> String {
    let label_width = rows
        .iter()
        .map(|row| display_width(&row.text_at(0)))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for row in rows {
        let value = row.get(1).map(format_value).unwrap_or_default();
        let _ = writeln!(output, "{:<width$} {}", row.text_at(0), value, width = label_width);
    }
    output
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{:.6}", f)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format_blob(b),
    }
}

fn format_blob(bytes: &[u8]) -> String {
    if bytes.len() <= BLOB_PREVIEW_BYTES {
        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        format!("x'{}'", hex)
    } else {
        let hex: String = bytes[..BLOB_PREVIEW_BYTES]
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect();
        format!("x'{}'... ({} bytes)", hex, bytes.len())
    }
}

/// Width in chars, matching how `{:<width$}` pads.
fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut result: String = s.chars().take(max_len - 3).collect();
        result.push_str("...");
        result
    }
}
