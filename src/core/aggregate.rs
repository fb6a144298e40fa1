//! Pivot aggregation rules.
//!
//! A fixed set of schema-guarded rules, each producing one named pivot table
//! when the columns it needs exist with the right inferred types. The rules
//! are independent: zero, one, or both may fire, and a schema that matches
//! none of them yields an empty result set rather than an error.

use crate::types::{AggregateResult, Column, ColumnValues, Table};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub const SALES_BY_CATEGORY: &str = "Sales by Category";
pub const MONTHLY_SALES: &str = "Monthly Sales";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Apply every aggregation rule to the table, in rule order.
pub fn build_aggregates(table: &Table) -> Vec<AggregateResult> {
    let mut results = Vec::new();
    if let Some(agg) = sales_by_category(table) {
        results.push(agg);
    }
    if let Some(agg) = monthly_sales(table) {
        results.push(agg);
    }
    results
}

/// "Sales by Category": group by the Text `Category` column, computing sum,
/// mean and count of the Numeric `Sales` column per group. Groups come out
/// in lexical key order.
fn sales_by_category(table: &Table) -> Option<AggregateResult> {
    let categories = text_column(table, "Category")?;
    let sales = numeric_column(table, "Sales")?;

    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (category, value) in categories.iter().zip(sales) {
        groups.entry(category).or_default().push(*value);
    }

    let mut keys = Vec::with_capacity(groups.len());
    let mut sums = Vec::with_capacity(groups.len());
    let mut means = Vec::with_capacity(groups.len());
    let mut counts = Vec::with_capacity(groups.len());
    for (key, values) in &groups {
        let sum: f64 = values.iter().sum();
        keys.push(key.to_string());
        sums.push(sum);
        means.push(sum / values.len() as f64);
        counts.push(values.len() as f64);
    }

    let mut out = Table::new();
    out.add_column(Column::new("Category", ColumnValues::Text(keys)));
    out.add_column(Column::new("sum", ColumnValues::Number(sums)));
    out.add_column(Column::new("mean", ColumnValues::Number(means)));
    out.add_column(Column::new("count", ColumnValues::Number(counts)));
    Some(AggregateResult::new(SALES_BY_CATEGORY, out))
}

/// "Monthly Sales": derive a month name from the Date `Date` column and sum
/// the Numeric `Sales` column per month. Groups come out in calendar order
/// (keyed on the month number); dates from different years share a bucket.
fn monthly_sales(table: &Table) -> Option<AggregateResult> {
    let dates = date_column(table, "Date")?;
    let sales = numeric_column(table, "Sales")?;

    let mut groups: BTreeMap<u32, f64> = BTreeMap::new();
    for (date, value) in dates.iter().zip(sales) {
        *groups.entry(date.month()).or_insert(0.0) += value;
    }

    let mut months = Vec::with_capacity(groups.len());
    let mut sums = Vec::with_capacity(groups.len());
    for (month, sum) in groups {
        months.push(month_name(month).to_string());
        sums.push(sum);
    }

    let mut out = Table::new();
    out.add_column(Column::new("Month", ColumnValues::Text(months)));
    out.add_column(Column::new("sum", ColumnValues::Number(sums)));
    Some(AggregateResult::new(MONTHLY_SALES, out))
}

/// Full month name for a 1-based month number.
fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

fn text_column<'a>(table: &'a Table, name: &str) -> Option<&'a [String]> {
    match &table.column(name)?.values {
        ColumnValues::Text(values) => Some(values),
        _ => None,
    }
}

fn numeric_column<'a>(table: &'a Table, name: &str) -> Option<&'a [f64]> {
    match &table.column(name)?.values {
        ColumnValues::Number(values) => Some(values),
        _ => None,
    }
}

fn date_column<'a>(table: &'a Table, name: &str) -> Option<&'a [NaiveDate]> {
    match &table.column(name)?.values {
        ColumnValues::Date(values) => Some(values),
        _ => None,
    }
}
