//! Reportgen - CSV to styled Excel reports
//!
//! This library loads a CSV file into a typed table, derives a fixed set of
//! pivot aggregations and per-column summary statistics from it, and renders
//! everything into a styled two-sheet .xlsx workbook with embedded charts.
//!
//! # Features
//!
//! - Column type inference at load time (Numeric, Text, Date)
//! - Schema-guarded pivot rules (Sales by Category, Monthly Sales)
//! - Mean / median / sample std dev / min / max per numeric column
//! - Styled "Raw Data" + "Analysis" sheets with embedded column charts
//!
//! # Example
//!
//! ```no_run
//! use reportgen::core::{build_aggregates, summarize};
//! use reportgen::excel::ReportExporter;
//! use reportgen::loader::load_csv;
//! use std::path::Path;
//!
//! let table = load_csv(Path::new("sales.csv"))?;
//! let aggregates = build_aggregates(&table);
//! let stats = summarize(&table);
//!
//! let exporter = ReportExporter::new(table, aggregates, stats);
//! exporter.export(Path::new("report.xlsx"))?;
//! # Ok::<(), reportgen::error::ReportError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod loader;
pub mod types;

// Re-export commonly used types
pub use error::{ReportError, ReportResult};
pub use types::{AggregateResult, Column, ColumnType, ColumnValues, SummaryStat, Table};
