//! Workbook builder implementation

use crate::error::{ReportError, ReportResult};
use crate::types::{AggregateResult, ColumnValues, SummaryStat, Table};
use rust_xlsxwriter::{Chart, ChartType, Color, Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

const RAW_DATA_SHEET: &str = "Raw Data";
const ANALYSIS_SHEET: &str = "Analysis";

/// Solid blue header fill.
const HEADER_FILL: u32 = 0x4F81BD;

/// Column F; clears the widest aggregate block (key + three measures).
const CHART_ANCHOR_COL: u16 = 5;

/// Blank rows between consecutive aggregate blocks.
const BLOCK_GAP_ROWS: u32 = 2;

/// Renders the report workbook: a styled "Raw Data" sheet and an "Analysis"
/// sheet with one titled, charted block per aggregate plus the summary
/// statistics beneath.
pub struct ReportExporter {
    table: Table,
    aggregates: Vec<AggregateResult>,
    stats: Vec<SummaryStat>,
}

impl ReportExporter {
    pub fn new(table: Table, aggregates: Vec<AggregateResult>, stats: Vec<SummaryStat>) -> Self {
        Self {
            table,
            aggregates,
            stats,
        }
    }

    /// Build the workbook and write it to `output_path`.
    ///
    /// The workbook is serialized to a `.tmp` sibling first and renamed into
    /// place, so a failed save never leaves a corrupt file at the target.
    pub fn export(&self, output_path: &Path) -> ReportResult<()> {
        let mut workbook = Workbook::new();

        self.write_raw_data(workbook.add_worksheet())?;
        self.write_analysis(workbook.add_worksheet())?;

        let tmp_path = output_path.with_extension("xlsx.tmp");
        workbook
            .save(&tmp_path)
            .map_err(|e| ReportError::Save(format!("Failed to write workbook: {}", e)))?;
        std::fs::rename(&tmp_path, output_path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            ReportError::Save(format!(
                "Failed to move report into place at '{}': {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Sheet 1: every row of the source table under a styled header row.
    fn write_raw_data(&self, worksheet: &mut Worksheet) -> ReportResult<()> {
        worksheet
            .set_name(RAW_DATA_SHEET)
            .map_err(|e| ReportError::Save(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = header_format();
        for (col_idx, column) in self.table.columns().iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, &column.name, &header_format)
                .map_err(|e| ReportError::Save(format!("Failed to write header: {}", e)))?;
        }

        for row_idx in 0..self.table.row_count() {
            for (col_idx, column) in self.table.columns().iter().enumerate() {
                write_cell(
                    worksheet,
                    row_idx as u32 + 1,
                    col_idx as u16,
                    &column.values,
                    row_idx,
                )?;
            }
        }

        let widths: Vec<f64> = self
            .table
            .columns()
            .iter()
            .map(|column| {
                let mut max_len = column.name.len();
                for row_idx in 0..column.len() {
                    max_len = max_len.max(column.values.render(row_idx).len());
                }
                fit_width(max_len)
            })
            .collect();
        set_column_widths(worksheet, &widths)?;

        Ok(())
    }

    /// Sheet 2: one block per aggregate (title, table, chart), then column
    /// widths refit across the sheet, then the summary statistics.
    fn write_analysis(&self, worksheet: &mut Worksheet) -> ReportResult<()> {
        worksheet
            .set_name(ANALYSIS_SHEET)
            .map_err(|e| ReportError::Save(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = header_format();
        let title_format = title_format();

        let mut row: u32 = 0;
        for aggregate in &self.aggregates {
            worksheet
                .write_string_with_format(row, 0, &aggregate.label, &title_format)
                .map_err(|e| ReportError::Save(format!("Failed to write title: {}", e)))?;

            let header_row = row + 1;
            for (col_idx, column) in aggregate.table.columns().iter().enumerate() {
                worksheet
                    .write_string_with_format(
                        header_row,
                        col_idx as u16,
                        &column.name,
                        &header_format,
                    )
                    .map_err(|e| ReportError::Save(format!("Failed to write header: {}", e)))?;
            }

            let group_count = aggregate.table.row_count();
            for row_idx in 0..group_count {
                for (col_idx, column) in aggregate.table.columns().iter().enumerate() {
                    write_cell(
                        worksheet,
                        header_row + 1 + row_idx as u32,
                        col_idx as u16,
                        &column.values,
                        row_idx,
                    )?;
                }
            }

            // A chart over zero rows is an invalid range; skip it.
            if group_count > 0 {
                let chart = build_chart(aggregate, header_row);
                worksheet
                    .insert_chart(row, CHART_ANCHOR_COL, &chart)
                    .map_err(|e| ReportError::Save(format!("Failed to insert chart: {}", e)))?;
            }

            row = header_row + 1 + group_count as u32 + BLOCK_GAP_ROWS;
        }

        set_column_widths(worksheet, &self.analysis_widths())?;

        worksheet
            .write_string_with_format(row, 0, "Summary Statistics", &title_format)
            .map_err(|e| ReportError::Save(format!("Failed to write title: {}", e)))?;
        row += 1;

        for stat in &self.stats {
            match stat {
                SummaryStat::Count { label, value } => {
                    worksheet
                        .write_string(row, 0, format!("{}:", label))
                        .map_err(|e| ReportError::Save(format!("Failed to write stat: {}", e)))?;
                    worksheet
                        .write_number(row, 1, *value as f64)
                        .map_err(|e| ReportError::Save(format!("Failed to write stat: {}", e)))?;
                }
                SummaryStat::Metric { label, value } => {
                    worksheet
                        .write_string(row, 0, format!("{}:", label))
                        .map_err(|e| ReportError::Save(format!("Failed to write stat: {}", e)))?;
                    worksheet
                        .write_number(row, 1, *value)
                        .map_err(|e| ReportError::Save(format!("Failed to write stat: {}", e)))?;
                }
                SummaryStat::Separator => {}
            }
            row += 1;
        }

        Ok(())
    }

    /// Per-column-position width over every aggregate block (titles, headers
    /// and cells). The summary block lands after this fit and is not measured.
    fn analysis_widths(&self) -> Vec<f64> {
        let column_count = self
            .aggregates
            .iter()
            .map(|a| a.table.column_count())
            .max()
            .unwrap_or(0);

        let mut max_lens = vec![0usize; column_count];
        for aggregate in &self.aggregates {
            if !max_lens.is_empty() {
                max_lens[0] = max_lens[0].max(aggregate.label.len());
            }
            for (col_idx, column) in aggregate.table.columns().iter().enumerate() {
                let mut max_len = column.name.len();
                for row_idx in 0..column.len() {
                    max_len = max_len.max(column.values.render(row_idx).len());
                }
                max_lens[col_idx] = max_lens[col_idx].max(max_len);
            }
        }

        max_lens.into_iter().map(fit_width).collect()
    }
}

/// Bold white on solid blue, centered. Applied to every header row.
fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
}

/// Bold size-12 block titles.
fn title_format() -> Format {
    Format::new().set_bold().set_font_size(12)
}

/// Character width for the longest rendered value plus padding.
fn fit_width(max_len: usize) -> f64 {
    (max_len + 2) as f64 * 1.2
}

fn set_column_widths(worksheet: &mut Worksheet, widths: &[f64]) -> ReportResult<()> {
    for (col_idx, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col_idx as u16, *width)
            .map_err(|e| ReportError::Save(format!("Failed to set column width: {}", e)))?;
    }
    Ok(())
}

/// Write a single cell value based on column type
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    values: &ColumnValues,
    index: usize,
) -> ReportResult<()> {
    match values {
        ColumnValues::Number(numbers) => {
            if let Some(&value) = numbers.get(index) {
                worksheet
                    .write_number(row, col, value)
                    .map_err(|e| ReportError::Save(format!("Failed to write number: {}", e)))?;
            }
        }
        ColumnValues::Text(texts) => {
            if let Some(value) = texts.get(index) {
                worksheet
                    .write_string(row, col, value)
                    .map_err(|e| ReportError::Save(format!("Failed to write text: {}", e)))?;
            }
        }
        ColumnValues::Date(dates) => {
            if let Some(value) = dates.get(index) {
                worksheet
                    .write_string(row, col, value.format("%Y-%m-%d").to_string())
                    .map_err(|e| ReportError::Save(format!("Failed to write date: {}", e)))?;
            }
        }
    }
    Ok(())
}

/// One column-chart per aggregate: a series per measure column, categories
/// from the group-key column, series names from the header cells.
fn build_chart(aggregate: &AggregateResult, header_row: u32) -> Chart {
    let mut chart = Chart::new(ChartType::Column);
    chart.title().set_name(aggregate.label.as_str());
    chart.x_axis().set_name("Categories");
    chart.y_axis().set_name("Values");

    let first_row = header_row + 1;
    let last_row = header_row + aggregate.table.row_count() as u32;
    for (col_idx, _column) in aggregate.table.columns().iter().enumerate().skip(1) {
        chart
            .add_series()
            .set_values((ANALYSIS_SHEET, first_row, col_idx as u16, last_row, col_idx as u16))
            .set_categories((ANALYSIS_SHEET, first_row, 0, last_row, 0))
            .set_name((ANALYSIS_SHEET, header_row, col_idx as u16));
    }

    chart
}
