// Delimited-text (CSV/TSV) export

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use rostergrid_engine::{Grid, Row, Table};

use crate::error::ExportError;

/// When a field gets wrapped in double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Quote fields containing the delimiter or a double quote.
    /// Output reads back through any standard CSV reader.
    #[default]
    Minimal,
    /// Quote only fields containing the delimiter. Embedded quotes are
    /// still doubled, so an unquoted `a""b` can come back verbatim.
    Legacy,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub delimiter: char,
    pub quote_style: QuoteStyle,
    /// Filename stem; the table id when None
    pub filename_stem: Option<String>,
    /// Appended to the filename as `_YYYY-MM-DD`
    pub date_stamp: Option<NaiveDate>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_style: QuoteStyle::Minimal,
            filename_stem: None,
            date_stamp: None,
        }
    }
}

/// Export text ready to hand to whatever saves the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedExport {
    pub text: String,
    pub filename: String,
}

/// Clean one cell's rendered text for export.
///
/// Line breaks are removed outright, then each non-overlapping pair of
/// whitespace characters becomes a single space. The pass runs once: three
/// spaces end up as two.
pub fn clean_cell_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().filter(|c| *c != '\r' && *c != '\n').peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && chars.peek().is_some_and(|n| n.is_whitespace()) {
            chars.next();
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Check that `delimiter` can separate fields.
///
/// Returns it as the single byte the CSV writer takes.
pub fn validate_delimiter(delimiter: char) -> Result<u8, ExportError> {
    match delimiter {
        '"' | '\r' | '\n' => Err(ExportError::InvalidDelimiter(delimiter)),
        c if c.is_ascii() => Ok(c as u8),
        c => Err(ExportError::InvalidDelimiter(c)),
    }
}

/// Escape a cleaned value under the legacy rule: `"` is doubled, and the
/// field is quoted only when it contains the delimiter.
pub fn escape_legacy_field(value: &str, delimiter: char) -> String {
    let escaped = value.replace('"', "\"\"");
    if value.contains(delimiter) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

fn cleaned_fields(row: &Row) -> Vec<String> {
    row.cells().iter().map(|cell| clean_cell_text(cell.text())).collect()
}

fn write_minimal<'a>(rows: impl Iterator<Item = &'a Row>, delimiter: u8) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(cleaned_fields(row))
            .map_err(|e| ExportError::Write(e.to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Write(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Write(e.to_string()))?;
    // Rows are joined by the terminator, not ended by it
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn write_legacy<'a>(rows: impl Iterator<Item = &'a Row>, delimiter: char) -> String {
    let separator = delimiter.to_string();
    let lines: Vec<String> = rows
        .map(|row| {
            cleaned_fields(row)
                .iter()
                .map(|value| escape_legacy_field(value, delimiter))
                .collect::<Vec<_>>()
                .join(&separator)
        })
        .collect();
    lines.join("\n")
}

fn export_rows<'a>(
    id: &str,
    rows: impl Iterator<Item = &'a Row>,
    options: &ExportOptions,
) -> Result<DelimitedExport, ExportError> {
    let delimiter = validate_delimiter(options.delimiter)?;
    let text = match options.quote_style {
        QuoteStyle::Minimal => write_minimal(rows, delimiter)?,
        QuoteStyle::Legacy => write_legacy(rows, options.delimiter),
    };
    debug!("exported table {id} ({} bytes)", text.len());
    Ok(DelimitedExport {
        text,
        filename: suggested_filename(id, options),
    })
}

/// Export every row of the table, head rows first, in data order.
pub fn export_to_delimited_text(
    table: &Table,
    options: &ExportOptions,
) -> Result<DelimitedExport, ExportError> {
    export_rows(table.id(), table.rows(), options)
}

/// Export a grid as the user sees it: head rows, then body rows in view
/// order. Rows hidden by the filter are still written.
pub fn export_grid(grid: &Grid, options: &ExportOptions) -> Result<DelimitedExport, ExportError> {
    let rows = grid
        .table()
        .head()
        .iter()
        .chain(grid.body_in_view_order().map(|(row, _)| row));
    export_rows(grid.id(), rows, options)
}

/// `<stem>[_YYYY-MM-DD].<ext>`, extension picked from the delimiter.
///
/// The stem keeps ASCII letters, digits, `-` and `_`; anything else becomes
/// `_`. An empty stem becomes `table`.
pub fn suggested_filename(table_id: &str, options: &ExportOptions) -> String {
    let raw = options.filename_stem.as_deref().unwrap_or(table_id);
    let mut stem: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        stem.push_str("table");
    }
    if let Some(date) = options.date_stamp {
        stem.push('_');
        stem.push_str(&date.format("%Y-%m-%d").to_string());
    }
    let ext = match options.delimiter {
        ',' => "csv",
        '\t' => "tsv",
        _ => "txt",
    };
    format!("{stem}.{ext}")
}
