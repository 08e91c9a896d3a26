//! Constant-rate extrapolation of escalation factors beyond observed data.
//!
//! Outside the reference range the index is assumed to grow by a fixed gross
//! annual rate `g`. A factor converts a nominal amount at `date` to target-date
//! terms, so moving one year forward divides it by `g` and moving one year back
//! multiplies it by `g`:
//!
//! `factor(date) = g^(-years(anchor_date, date)) * anchor_factor`

use chrono::NaiveDate;

use crate::dates::{DayCountConvention, year_fraction};

/// Estimates the factor at `date` from a known factor at `anchor_date`.
///
/// `years` is signed, so backward projection (dates before the anchor) raises
/// the factor when `rate > 1`.
///
/// # Examples
/// ```rust
/// use chrono::NaiveDate;
/// use cpi_escalation::dates::DayCountConvention;
/// use cpi_escalation::escalation::estimate_factor;
///
/// let anchor = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let next = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
/// let f = estimate_factor(anchor, 1.0, next, 1.025, DayCountConvention::Act365_25);
/// assert!((f - 0.9756).abs() < 1.0e-3);
/// ```
pub fn estimate_factor(
    anchor_date: NaiveDate,
    anchor_factor: f64,
    date: NaiveDate,
    rate: f64,
    day_count: DayCountConvention,
) -> f64 {
    let years = year_fraction(anchor_date, date, day_count);
    rate.powf(-years) * anchor_factor
}
