//! Textual date parsing for delimited reference tables.
//!
//! Published index tables disagree on field order, so the caller picks a
//! [`DateOrder`]. ISO `YYYY-MM-DD` is always accepted regardless of order, and
//! a trailing time component (`2019-09-01 00:00:00`, `2019-09-01T00:00`) is
//! ignored.

use chrono::NaiveDate;

use crate::core::EscalationError;

/// Field order for numeric `a/b/year` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `day/month/year`, e.g. `1/9/2019` is 1 September.
    #[default]
    DayFirst,
    /// `month/day/year`, e.g. `9/1/2019` is 1 September.
    MonthFirst,
    /// Only `YYYY-MM-DD` (and `YYYY/MM/DD`).
    Iso,
}

// `%y` forms come first: `%Y` would otherwise read `69` as year 69.
const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y",
];
const MONTH_FIRST_FORMATS: [&str; 6] = [
    "%m/%d/%y", "%m-%d-%y", "%m.%d.%y", "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y",
];
const ISO_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const TEXT_MONTH_FORMATS: [&str; 4] = ["%d-%b-%Y", "%d %b %Y", "%d-%B-%Y", "%d %B %Y"];

/// Parses one date cell.
///
/// # Errors
/// Returns [`EscalationError::InvalidInput`] if the text is not a valid calendar date
/// under `order`.
///
/// # Examples
/// ```rust
/// use chrono::NaiveDate;
/// use cpi_escalation::dates::{DateOrder, parse_date};
///
/// let sep1 = NaiveDate::from_ymd_opt(2019, 9, 1).unwrap();
/// assert_eq!(parse_date("01/09/2019", DateOrder::DayFirst).unwrap(), sep1);
/// assert_eq!(parse_date("09/01/2019", DateOrder::MonthFirst).unwrap(), sep1);
/// assert_eq!(parse_date("2019-09-01", DateOrder::DayFirst).unwrap(), sep1);
/// ```
pub fn parse_date(text: &str, order: DateOrder) -> Result<NaiveDate, EscalationError> {
    let date_part = strip_time(text);

    let order_formats: &[&str] = match order {
        DateOrder::DayFirst => &DAY_FIRST_FORMATS,
        DateOrder::MonthFirst => &MONTH_FIRST_FORMATS,
        DateOrder::Iso => &[],
    };
    let text_formats: &[&str] = match order {
        DateOrder::Iso => &[],
        _ => &TEXT_MONTH_FORMATS,
    };

    for fmt in order_formats.iter().chain(ISO_FORMATS.iter()).chain(text_formats) {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, fmt) {
            return Ok(date);
        }
    }

    Err(EscalationError::invalid(format!(
        "cannot parse '{}' as a date ({order:?})",
        text.trim()
    )))
}

/// Drops trailing time tokens (`00:00:00`, `T12:30`, `+10:00`).
fn strip_time(text: &str) -> &str {
    let mut rest = text.trim();
    while let Some((head, tail)) = rest.rsplit_once(|c: char| c == 'T' || c.is_whitespace()) {
        if !tail.contains(':') {
            break;
        }
        rest = head.trim_end();
    }
    rest
}
