//! Workbook output tests: generate a report, read it back with calamine

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use reportgen::core::{build_aggregates, summarize};
use reportgen::excel::ReportExporter;
use reportgen::loader::load_csv;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SALES_CSV: &str = "\
Date,Category,Product,Sales,Units
2023-01-01,Electronics,TV,1500,5
2023-01-01,Furniture,Sofa,1200,3
2023-01-02,Electronics,Phone,800,10
2023-01-02,Furniture,Table,400,8
2023-01-03,Electronics,Laptop,2000,4
2023-01-04,Furniture,Chair,300,12
2023-01-05,Electronics,Tablet,600,7
2023-01-06,Furniture,Cabinet,750,2
2023-02-01,Electronics,TV,1600,6
2023-02-02,Furniture,Sofa,1250,4
2023-02-03,Electronics,Phone,850,9
2023-02-04,Electronics,Laptop,2100,5
";

fn generate_report(dir: &TempDir, csv_content: &str) -> PathBuf {
    let csv_path = dir.path().join("data.csv");
    fs::write(&csv_path, csv_content).unwrap();

    let table = load_csv(&csv_path).unwrap();
    let aggregates = build_aggregates(&table);
    let stats = summarize(&table);

    let output_path = dir.path().join("report.xlsx");
    ReportExporter::new(table, aggregates, stats)
        .export(&output_path)
        .unwrap();
    output_path
}

fn read_sheet(path: &Path, sheet: &str) -> Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.worksheet_range(sheet).unwrap()
}

fn cell_string(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected string at ({row},{col}), got {other:?}"),
    }
}

fn cell_number(range: &Range<Data>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number at ({row},{col}), got {other:?}"),
    }
}

fn contains_string(range: &Range<Data>, needle: &str) -> bool {
    range
        .cells()
        .any(|(_, _, data)| matches!(data, Data::String(s) if s == needle))
}

#[test]
fn test_workbook_has_exactly_two_sheets() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    let workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(
        workbook.sheet_names().to_vec(),
        vec!["Raw Data".to_string(), "Analysis".to_string()]
    );
}

#[test]
fn test_raw_data_round_trips_headers_and_row_count() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    let raw = read_sheet(&path, "Raw Data");
    let (rows, cols) = raw.get_size();

    // 12 data rows + 1 header row, 5 source columns.
    assert_eq!((rows, cols), (13, 5));
    let headers: Vec<String> = (0..5).map(|c| cell_string(&raw, 0, c)).collect();
    assert_eq!(headers, vec!["Date", "Category", "Product", "Sales", "Units"]);
}

#[test]
fn test_raw_data_preserves_cell_values() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    let raw = read_sheet(&path, "Raw Data");
    assert_eq!(cell_string(&raw, 1, 0), "2023-01-01");
    assert_eq!(cell_string(&raw, 1, 1), "Electronics");
    assert_eq!(cell_string(&raw, 1, 2), "TV");
    assert_eq!(cell_number(&raw, 1, 3), 1500.0);
    assert_eq!(cell_number(&raw, 1, 4), 5.0);
}

#[test]
fn test_analysis_category_block_layout() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    let analysis = read_sheet(&path, "Analysis");

    // Block 1: title, header, one row per category in lexical order.
    assert_eq!(cell_string(&analysis, 0, 0), "Sales by Category");
    assert_eq!(cell_string(&analysis, 1, 0), "Category");
    assert_eq!(cell_string(&analysis, 1, 1), "sum");
    assert_eq!(cell_string(&analysis, 1, 2), "mean");
    assert_eq!(cell_string(&analysis, 1, 3), "count");

    assert_eq!(cell_string(&analysis, 2, 0), "Electronics");
    assert_eq!(cell_number(&analysis, 2, 1), 9450.0);
    assert_eq!(cell_number(&analysis, 2, 3), 7.0);

    assert_eq!(cell_string(&analysis, 3, 0), "Furniture");
    assert_eq!(cell_number(&analysis, 3, 1), 3900.0);
    assert_eq!(cell_number(&analysis, 3, 3), 5.0);
}

#[test]
fn test_analysis_monthly_block_in_calendar_order() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    let analysis = read_sheet(&path, "Analysis");

    // Block 2 starts after block 1 (4 rows) plus the 2-row gap.
    assert_eq!(cell_string(&analysis, 6, 0), "Monthly Sales");
    assert_eq!(cell_string(&analysis, 7, 0), "Month");
    assert_eq!(cell_string(&analysis, 8, 0), "January");
    assert_eq!(cell_number(&analysis, 8, 1), 7550.0);
    assert_eq!(cell_string(&analysis, 9, 0), "February");
    assert_eq!(cell_number(&analysis, 9, 1), 5800.0);
}

#[test]
fn test_analysis_summary_block() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    let analysis = read_sheet(&path, "Analysis");

    assert!(contains_string(&analysis, "Summary Statistics"));
    assert_eq!(cell_string(&analysis, 13, 0), "Total Records:");
    assert_eq!(cell_number(&analysis, 13, 1), 12.0);
    assert_eq!(cell_string(&analysis, 14, 0), "Sales - Mean:");
    assert_eq!(cell_number(&analysis, 14, 1), 1112.5);
}

#[test]
fn test_unpivotable_schema_still_produces_report() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, "Product,Units\nTV,5\nSofa,3\n");

    let analysis = read_sheet(&path, "Analysis");
    assert!(contains_string(&analysis, "Summary Statistics"));
    assert!(!contains_string(&analysis, "Sales by Category"));
    assert!(!contains_string(&analysis, "Monthly Sales"));

    // Units statistics still present.
    assert!(contains_string(&analysis, "Units - Mean:"));
}

#[test]
fn test_regenerating_overwrites_previous_report() {
    let dir = TempDir::new().unwrap();
    let path = generate_report(&dir, SALES_CSV);

    // Second run with a smaller dataset replaces the file.
    let csv_path = dir.path().join("data.csv");
    fs::write(&csv_path, "Product,Units\nTV,5\n").unwrap();
    let table = load_csv(&csv_path).unwrap();
    let aggregates = build_aggregates(&table);
    let stats = summarize(&table);
    ReportExporter::new(table, aggregates, stats)
        .export(&path)
        .unwrap();

    let raw = read_sheet(&path, "Raw Data");
    assert_eq!(raw.get_size(), (2, 2));
}
