//! Descriptive statistics over numeric columns.
//!
//! Emission order is fixed: one leading record-count entry, then for each
//! Numeric column in table order a block of mean, median, standard deviation,
//! min and max, closed by a blank separator. Standard deviation uses the
//! sample convention (squared-deviation sum over N-1).

use crate::types::{ColumnValues, SummaryStat, Table};

/// Compute the summary-statistics block for a table.
pub fn summarize(table: &Table) -> Vec<SummaryStat> {
    let mut stats = vec![SummaryStat::Count {
        label: "Total Records".to_string(),
        value: table.row_count(),
    }];

    for column in table.columns() {
        let ColumnValues::Number(values) = &column.values else {
            continue;
        };
        stats.push(SummaryStat::Metric {
            label: format!("{} - Mean", column.name),
            value: mean(values),
        });
        stats.push(SummaryStat::Metric {
            label: format!("{} - Median", column.name),
            value: median(values),
        });
        stats.push(SummaryStat::Metric {
            label: format!("{} - Std Dev", column.name),
            value: sample_std_dev(values),
        });
        stats.push(SummaryStat::Metric {
            label: format!("{} - Min", column.name),
            value: fold_min(values),
        });
        stats.push(SummaryStat::Metric {
            label: format!("{} - Max", column.name),
            value: fold_max(values),
        });
        stats.push(SummaryStat::Separator);
    }

    stats
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Sample standard deviation (ddof = 1). Defined as 0.0 for fewer than two
/// values, where the N-1 denominator vanishes.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let squared_deviations: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (squared_deviations / (values.len() - 1) as f64).sqrt()
}

fn fold_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
