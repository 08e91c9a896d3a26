//! Core domain types, configuration, and the library-wide error type.

use chrono::{NaiveDate, NaiveDateTime};

pub mod config;
pub mod serialization;
pub mod types;

pub use config::*;
pub use serialization::*;
pub use types::*;

/// Errors surfaced by escalator construction, retargeting, and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscalationError {
    /// Malformed reference table, configuration, or delimited-text content.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The target date precedes every reference observation.
    #[error("no reference observation on or before target date {target} (earliest is {earliest})")]
    NoAnchor {
        target: NaiveDateTime,
        earliest: NaiveDate,
    },
    /// A caller date lies outside the reference range while estimation is disabled.
    #[error(
        "date {date} is outside the reference range {min}..={max} and estimation is disabled"
    )]
    OutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
    /// Caller dates and values are not paired one-to-one.
    #[error("input lengths mismatch: {dates} dates vs {values} values")]
    LengthMismatch { dates: usize, values: usize },
    /// The reference source could not be opened or read.
    #[error("io error: {0}")]
    Io(String),
}

impl EscalationError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}
