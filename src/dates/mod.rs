//! Calendar helpers: day counts for extrapolation and textual date parsing.

pub mod day_count;
pub mod parse;

pub use day_count::{DayCountConvention, year_fraction};
pub use parse::{DateOrder, parse_date};
