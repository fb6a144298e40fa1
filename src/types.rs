use chrono::NaiveDate;
use serde::Serialize;

//==============================================================================
// Column Types
//==============================================================================

/// Inferred type of a CSV column, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
    Date,
}

impl ColumnType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Numeric",
            ColumnType::Text => "Text",
            ColumnType::Date => "Date",
        }
    }
}

/// Column value storage (homogeneous arrays)
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// Array of numbers (f64)
    Number(Vec<f64>),
    /// Array of text strings
    Text(Vec<String>),
    /// Array of calendar dates
    Date(Vec<NaiveDate>),
}

impl ColumnValues {
    /// Get the length of the array
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
        }
    }

    /// Check if array is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValues::Number(_) => ColumnType::Numeric,
            ColumnValues::Text(_) => ColumnType::Text,
            ColumnValues::Date(_) => ColumnType::Date,
        }
    }

    /// Render the value at `index` the way it appears in a spreadsheet cell.
    /// Used for column-width fitting and terminal display.
    pub fn render(&self, index: usize) -> String {
        match self {
            ColumnValues::Number(v) => v.get(index).map(|n| n.to_string()).unwrap_or_default(),
            ColumnValues::Text(v) => v.get(index).cloned().unwrap_or_default(),
            ColumnValues::Date(v) => v
                .get(index)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// A named column in a table
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_type(&self) -> ColumnType {
        self.values.column_type()
    }
}

//==============================================================================
// Table
//==============================================================================

/// An in-memory table of named, typed columns.
///
/// Columns keep the order they had in the source CSV; the "Raw Data" sheet
/// depends on that order surviving the pipeline. Name uniqueness is enforced
/// by the loader before a `Table` is handed out.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of rows (length of first column, all should be same)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |col| col.len())
    }

    /// Validate all columns have the same length
    pub fn validate_lengths(&self) -> Result<(), String> {
        let row_count = self.row_count();
        for column in &self.columns {
            if column.len() != row_count {
                return Err(format!(
                    "Column '{}' has {} rows, expected {} rows",
                    column.name,
                    column.len(),
                    row_count
                ));
            }
        }
        Ok(())
    }
}

//==============================================================================
// Derived Results
//==============================================================================

/// A named pivot table derived from the loaded data.
///
/// The group key is the first column, the aggregate measures follow.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    pub label: String,
    pub table: Table,
}

impl AggregateResult {
    pub fn new(label: impl Into<String>, table: Table) -> Self {
        Self {
            label: label.into(),
            table,
        }
    }
}

/// One entry in the summary-statistics block, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryStat {
    /// Leading total-record-count entry
    Count { label: String, value: usize },
    /// One labeled scalar statistic (mean, median, ...)
    Metric { label: String, value: f64 },
    /// Blank row between per-column blocks
    Separator,
}
