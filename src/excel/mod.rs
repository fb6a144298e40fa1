//! Excel report rendering
//!
//! Turns the loaded table, its pivot aggregates and the summary statistics
//! into a styled two-sheet .xlsx workbook with embedded charts.

mod exporter;

pub use exporter::ReportExporter;
