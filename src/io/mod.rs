//! Loading reference series from external sources.

pub mod csv;

pub use self::csv::{CsvOptions, read_table, read_table_from_path};
