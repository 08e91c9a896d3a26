//! Delimited-text loading of reference index tables.
//!
//! The file must have a header row. The date column is found by name; the
//! value column is either named explicitly or, for a two-column file, taken to
//! be the other column. Any malformed cell rejects the whole file with the
//! offending line number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

use crate::core::EscalationError;
use crate::dates::{DateOrder, parse_date};
use crate::series::{Column, Table};

/// Reading conventions for a reference table file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Header of the date column, matched case-insensitively.
    pub date_column: String,
    /// Header of the index column; `None` picks the only other column.
    pub value_column: Option<String>,
    /// How numeric `a/b/year` dates are read.
    pub date_order: DateOrder,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            date_column: "Date".to_string(),
            value_column: None,
            date_order: DateOrder::DayFirst,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_date_column<S: Into<String>>(mut self, name: S) -> Self {
        self.date_column = name.into();
        self
    }

    pub fn with_value_column<S: Into<String>>(mut self, name: S) -> Self {
        self.value_column = Some(name.into());
        self
    }

    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }
}

/// Opens `path` and reads it with [`read_table`].
///
/// # Errors
/// [`EscalationError::Io`] when the file cannot be opened.
pub fn read_table_from_path<P: AsRef<Path>>(
    path: P,
    options: &CsvOptions,
) -> Result<Table, EscalationError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        EscalationError::Io(format!("failed to open '{}': {e}", path.display()))
    })?;
    let table = read_table(file, options)?;
    debug!(path = %path.display(), rows = table.n_rows(), "loaded reference table");
    Ok(table)
}

/// Reads a (date, index) table from any reader.
///
/// # Errors
/// - [`EscalationError::InvalidInput`] for missing columns or unparseable cells.
/// - [`EscalationError::Io`] for read failures.
///
/// # Examples
/// ```rust
/// use cpi_escalation::io::{CsvOptions, read_table};
///
/// let data = "Date,CPI\n01/09/2019,116.2\n01/12/2019,116.9\n";
/// let table = read_table(data.as_bytes(), &CsvOptions::default()).unwrap();
/// assert_eq!(table.n_rows(), 2);
/// ```
pub fn read_table<R: Read>(reader: R, options: &CsvOptions) -> Result<Table, EscalationError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let (date_idx, value_idx) = resolve_columns(&headers, options)?;

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());

        let date_text = record.get(date_idx).unwrap_or("");
        let date = parse_date(date_text, options.date_order).map_err(|e| {
            EscalationError::invalid(format!("line {line}: {}", error_detail(&e)))
        })?;

        let value_text = record.get(value_idx).unwrap_or("");
        let value: f64 = value_text.parse().map_err(|_| {
            EscalationError::invalid(format!(
                "line {line}: cannot parse '{value_text}' as a number"
            ))
        })?;

        dates.push(date);
        values.push(value);
    }

    Ok(Table::new()
        .with_column(&headers[date_idx], Column::Date(dates))
        .with_column(&headers[value_idx], Column::Numeric(values)))
}

fn resolve_columns(
    headers: &StringRecord,
    options: &CsvOptions,
) -> Result<(usize, usize), EscalationError> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                EscalationError::invalid(format!(
                    "column '{name}' not found in header {:?}",
                    headers.iter().collect::<Vec<_>>()
                ))
            })
    };

    let date_idx = find(options.date_column.as_str())?;
    let value_idx = match &options.value_column {
        Some(name) => find(name.as_str())?,
        None if headers.len() == 2 => 1 - date_idx,
        None => {
            return Err(EscalationError::invalid(format!(
                "expected 2 columns (date, index) but header has {}; set value_column",
                headers.len()
            )));
        }
    };
    if value_idx == date_idx {
        return Err(EscalationError::invalid(
            "date and value columns must be different",
        ));
    }
    Ok((date_idx, value_idx))
}

fn csv_error(err: csv::Error) -> EscalationError {
    if err.is_io_error() {
        EscalationError::Io(err.to_string())
    } else {
        EscalationError::invalid(err.to_string())
    }
}

fn error_detail(err: &EscalationError) -> String {
    match err {
        EscalationError::InvalidInput(msg) => msg.clone(),
        other => other.to_string(),
    }
}
