//! CSV loading and column type inference.
//!
//! Turns a headered CSV file into a [`Table`] of typed columns. Type detection
//! is a single explicit pass per column: a column is Numeric when every cell
//! parses as a finite `f64`, Date when every cell parses as a calendar date,
//! and Text otherwise. Empty cells defeat both Numeric and Date inference, so
//! a column with holes degrades to Text instead of poisoning downstream math.

use crate::error::{ReportError, ReportResult};
use crate::types::{Column, ColumnValues, Table};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;

/// Date layouts accepted by the inference pass, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Load a CSV file into a [`Table`].
///
/// The first record is the header row; its names become the column names and
/// must be unique. All data records must have the same width as the header
/// (the reader rejects ragged rows). A header-only file loads as an empty
/// table.
///
/// # Errors
/// * [`ReportError::Load`] - missing/unreadable file, empty file, duplicate
///   header names
/// * [`ReportError::Csv`] - malformed CSV content
pub fn load_csv(path: &Path) -> ReportResult<Table> {
    let file = std::fs::File::open(path).map_err(|e| {
        ReportError::Load(format!("Failed to open CSV '{}': {}", path.display(), e))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ReportError::Load(format!(
            "CSV '{}' is empty: no header row found",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(ReportError::Load(format!(
                "Duplicate column name '{}' in CSV header",
                name
            )));
        }
    }

    // Collect raw cells column-wise; typing happens after the full read so
    // inference sees every value.
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (idx, cell) in record.iter().enumerate() {
            raw_columns[idx].push(cell.to_string());
        }
    }

    let mut table = Table::new();
    for (name, raw) in headers.iter().zip(raw_columns) {
        table.add_column(infer_column(name, raw));
    }

    Ok(table)
}

/// Build a typed column from raw string cells.
fn infer_column(name: &str, raw: Vec<String>) -> Column {
    if !raw.is_empty() {
        if let Some(numbers) = parse_all_numbers(&raw) {
            return Column::new(name, ColumnValues::Number(numbers));
        }
        if let Some(dates) = parse_all_dates(&raw) {
            return Column::new(name, ColumnValues::Date(dates));
        }
    }
    Column::new(name, ColumnValues::Text(raw))
}

/// All cells as finite numbers, or None if any cell refuses.
fn parse_all_numbers(raw: &[String]) -> Option<Vec<f64>> {
    raw.iter()
        .map(|cell| cell.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect()
}

/// All cells as calendar dates, or None if any cell refuses.
fn parse_all_dates(raw: &[String]) -> Option<Vec<NaiveDate>> {
    raw.iter().map(|cell| parse_date(cell)).collect()
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
}
