//! Shared domain types.
//!
//! The table is stored column-wise: one index vector plus one value vector per
//! measure column, all of the same length.

use chrono::{NaiveDateTime, Timelike};

/// Dimensions of a table: rows, and columns excluding the date index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

impl std::fmt::Display for TableShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}

/// Values of one measure column, typed by inference at load time.
///
/// `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    /// Numeric columns are right-aligned in the preview.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnValues::Int(_) | ColumnValues::Float(_))
    }

    fn head(&self, n: usize) -> Self {
        match self {
            ColumnValues::Int(v) => ColumnValues::Int(v.iter().take(n).copied().collect()),
            ColumnValues::Float(v) => ColumnValues::Float(v.iter().take(n).copied().collect()),
            ColumnValues::Text(v) => ColumnValues::Text(v.iter().take(n).cloned().collect()),
        }
    }
}

/// A named measure column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// The processed daily sales table: a date index plus measure columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    pub index_name: String,
    pub index: Vec<NaiveDateTime>,
    pub columns: Vec<Column>,
}

impl SalesTable {
    pub fn shape(&self) -> TableShape {
        TableShape {
            rows: self.index.len(),
            columns: self.columns.len(),
        }
    }

    /// The first `n` rows, in file order.
    pub fn head(&self, n: usize) -> SalesTable {
        SalesTable {
            index_name: self.index_name.clone(),
            index: self.index.iter().take(n).copied().collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.head(n),
                })
                .collect(),
        }
    }

    /// True when every index value falls on midnight, i.e. the index holds
    /// plain calendar dates.
    pub fn index_is_date_only(&self) -> bool {
        self.index
            .iter()
            .all(|ts| ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0)
    }

    /// True when each index value is strictly greater than the one before.
    pub fn index_is_strictly_increasing(&self) -> bool {
        self.index.windows(2).all(|w| w[0] < w[1])
    }
}
