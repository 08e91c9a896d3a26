//! Reference index data: raw two-column tables and the validated, date-ordered series.

pub mod reference;
pub mod table;

pub use reference::ReferenceSeries;
pub use table::{Column, ColumnKind, Table};
