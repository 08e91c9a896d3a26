//! Minimal named-column table used as the raw construction input.
//!
//! A reference table is expected to hold exactly one date column and one
//! numeric column; anything else is rejected when it is turned into a
//! [`ReferenceSeries`](crate::series::ReferenceSeries).

use chrono::NaiveDate;

/// Type tag of a [`Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Numeric,
    Text,
}

/// Homogeneously typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Date(Vec<NaiveDate>),
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Date(v) => v.len(),
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Date(_) => ColumnKind::Date,
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Text(_) => ColumnKind::Text,
        }
    }
}

/// Ordered collection of named columns.
///
/// # Examples
/// ```rust
/// use chrono::NaiveDate;
/// use cpi_escalation::series::{Column, Table};
///
/// let table = Table::new()
///     .with_column("Date", Column::Date(vec![NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()]))
///     .with_column("CPI", Column::Numeric(vec![100.0]));
/// assert_eq!(table.n_columns(), 2);
/// assert_eq!(table.n_rows(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column and returns the table.
    pub fn with_column<S: Into<String>>(mut self, name: S, column: Column) -> Self {
        self.push_column(name, column);
        self
    }

    pub fn push_column<S: Into<String>>(&mut self, name: S, column: Column) {
        self.columns.push((name.into(), column));
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column.
    pub fn n_rows(&self) -> usize {
        self.columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }
}
