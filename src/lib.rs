//! `cpi_escalation` converts monetary amounts between nominal (as-spent) and real
//! (restated at a fixed target date) terms using a consumer price index series.
//!
//! The crate is built around one type, [`escalation::Escalator`], which:
//! - validates a two-column (date, index) reference series and orders it by date,
//! - derives one escalation factor per row, `index(target) / index(row)`,
//! - resolves factors for arbitrary caller dates by step lookup inside the series and
//!   constant-rate extrapolation outside it,
//! - applies them: `real = nominal * factor`, `nominal = real / factor`.
//!
//! Numerical considerations:
//! - Factors inside the range are exact ratios of published index values.
//! - Outside the range the index is assumed to grow at `default_escalation_rate` per year
//!   (default `1.025`); the distance is measured with a configurable day count
//!   (default actual/365.25).
//! - Set `allow_estimation = false` to reject any date outside the observed range instead.
//!
//! There is no built-in dataset: the reference series is always supplied by the caller,
//! either in memory or from a delimited file via [`io::read_table_from_path`].
//!
//! # Quick Start
//! Restate an amount from 2020 in 2021 terms:
//! ```rust
//! use chrono::NaiveDate;
//! use cpi_escalation::core::EscalatorConfig;
//! use cpi_escalation::escalation::Escalator;
//! use cpi_escalation::series::{Column, Table};
//!
//! let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
//! let table = Table::new()
//!     .with_column("Date", Column::Date(vec![d(2020), d(2021)]))
//!     .with_column("CPI", Column::Numeric(vec![100.0, 110.0]));
//!
//! let esc = Escalator::new(&table, EscalatorConfig::default().with_target_date(d(2021))).unwrap();
//! let real = esc.to_real(&[d(2020)], &[50.0]).unwrap();
//! assert!((real[0] - 55.0).abs() < 1.0e-12);
//! ```
//!
//! Extrapolate past the last observation:
//! ```rust
//! use chrono::NaiveDate;
//! use cpi_escalation::escalation::Escalator;
//!
//! let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
//! let esc = Escalator::builder()
//!     .observations(vec![(d(2020), 100.0).into(), (d(2021), 110.0).into()])
//!     .target_date(d(2021))
//!     .default_escalation_rate(1.025)
//!     .build()
//!     .unwrap();
//!
//! let f = esc.factor_at(d(2022)).unwrap();
//! assert!((f - 1.0 / 1.025).abs() < 1.0e-3);
//! ```
//!
//! Load a series from CSV text:
//! ```rust
//! use cpi_escalation::core::EscalatorConfig;
//! use cpi_escalation::escalation::Escalator;
//! use cpi_escalation::io::{CsvOptions, read_table};
//!
//! let csv = "Date,CPI\n01/06/2019,114.8\n01/09/2019,115.4\n";
//! let table = read_table(csv.as_bytes(), &CsvOptions::default()).unwrap();
//! let esc = Escalator::new(&table, EscalatorConfig::default()).unwrap();
//! assert_eq!(esc.factors().len(), 2);
//! ```

pub mod core;
pub mod dates;
pub mod escalation;
pub mod io;
pub mod series;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::dates::*;
    pub use crate::escalation::*;
    pub use crate::io::{CsvOptions, read_table, read_table_from_path};
    pub use crate::series::*;
}
