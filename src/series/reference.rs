use chrono::NaiveDate;

use crate::core::{EscalationError, IndexObservation};
use crate::series::{Column, ColumnKind, Table};

/// Validated index series, sorted ascending by date with unique dates.
///
/// Always holds at least one observation and every value is finite and `> 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSeries {
    observations: Vec<IndexObservation>,
}

impl ReferenceSeries {
    /// Validates and sorts raw observations.
    ///
    /// # Errors
    /// Returns [`EscalationError::InvalidInput`] for an empty series, a repeated date,
    /// or a non-finite / non-positive index value.
    pub fn new(mut observations: Vec<IndexObservation>) -> Result<Self, EscalationError> {
        if observations.is_empty() {
            return Err(EscalationError::invalid(
                "reference series must contain at least one observation",
            ));
        }
        if let Some(bad) = observations
            .iter()
            .find(|o| !o.value.is_finite() || o.value <= 0.0)
        {
            return Err(EscalationError::invalid(format!(
                "index value at {} must be finite and > 0, got {}",
                bad.date, bad.value
            )));
        }

        observations.sort_by_key(|o| o.date);
        if let Some(w) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(EscalationError::invalid(format!(
                "reference series has duplicate date {}",
                w[0].date
            )));
        }

        Ok(Self { observations })
    }

    /// Builds a series from a two-column table: one date column and one numeric column,
    /// in either order.
    ///
    /// # Errors
    /// Returns [`EscalationError::InvalidInput`] when the table does not have that shape,
    /// when the columns differ in length, or when [`ReferenceSeries::new`] rejects the rows.
    pub fn from_table(table: &Table) -> Result<Self, EscalationError> {
        if table.n_columns() != 2 {
            return Err(EscalationError::invalid(format!(
                "reference table must have exactly 2 columns (one date, one numeric), got {}",
                table.n_columns()
            )));
        }

        let mut dates = None;
        let mut values = None;
        for (_, column) in table.columns() {
            match column {
                Column::Date(d) if dates.is_none() => dates = Some(d),
                Column::Numeric(v) if values.is_none() => values = Some(v),
                _ => {}
            }
        }

        let (Some(dates), Some(values)) = (dates, values) else {
            let kinds: Vec<ColumnKind> = table.columns().iter().map(|(_, c)| c.kind()).collect();
            return Err(EscalationError::invalid(format!(
                "reference table must have one date and one numeric column, got {kinds:?}"
            )));
        };
        if dates.len() != values.len() {
            return Err(EscalationError::invalid(format!(
                "reference columns differ in length: {} dates vs {} values",
                dates.len(),
                values.len()
            )));
        }

        let observations = dates
            .iter()
            .zip(values.iter())
            .map(|(&date, &value)| IndexObservation { date, value })
            .collect();
        Self::new(observations)
    }

    pub fn observations(&self) -> &[IndexObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.observations[0].date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.observations[self.observations.len() - 1].date
    }

    /// Whether `date` lies in `[min_date, max_date]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min_date() && date <= self.max_date()
    }

    /// Index of the latest observation dated on or before `date`.
    ///
    /// Returns `None` when `date` precedes the whole series.
    pub fn anchor_index(&self, date: NaiveDate) -> Option<usize> {
        match self.observations.partition_point(|o| o.date <= date) {
            0 => None,
            idx => Some(idx - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn quarterly() -> ReferenceSeries {
        ReferenceSeries::new(vec![
            IndexObservation::new(d(2020, 7), 102.0),
            IndexObservation::new(d(2020, 1), 100.0),
            IndexObservation::new(d(2020, 10), 103.0),
            IndexObservation::new(d(2020, 4), 101.0),
        ])
        .unwrap()
    }

    #[test]
    fn sorts_by_date() {
        let s = quarterly();
        let dates: Vec<_> = s.observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![d(2020, 1), d(2020, 4), d(2020, 7), d(2020, 10)]);
        assert_eq!(s.min_date(), d(2020, 1));
        assert_eq!(s.max_date(), d(2020, 10));
    }

    #[test]
    fn constructed_series_is_never_empty() {
        let s = quarterly();
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
    }

    #[test]
    fn anchor_is_step_lookup() {
        let s = quarterly();
        assert_eq!(s.anchor_index(d(2019, 12)), None);
        assert_eq!(s.anchor_index(d(2020, 1)), Some(0));
        assert_eq!(s.anchor_index(NaiveDate::from_ymd_opt(2020, 3, 31).unwrap()), Some(0));
        assert_eq!(s.anchor_index(d(2020, 4)), Some(1));
        assert_eq!(s.anchor_index(d(2030, 1)), Some(3));
    }

    #[test]
    fn rejects_empty_duplicate_and_non_positive() {
        assert!(ReferenceSeries::new(Vec::new()).is_err());
        assert!(
            ReferenceSeries::new(vec![
                IndexObservation::new(d(2020, 1), 100.0),
                IndexObservation::new(d(2020, 1), 101.0),
            ])
            .is_err()
        );
        assert!(ReferenceSeries::new(vec![IndexObservation::new(d(2020, 1), 0.0)]).is_err());
        assert!(ReferenceSeries::new(vec![IndexObservation::new(d(2020, 1), f64::NAN)]).is_err());
    }

    #[test]
    fn table_columns_in_either_order() {
        let table = Table::new()
            .with_column("CPI", Column::Numeric(vec![110.0, 100.0]))
            .with_column("Date", Column::Date(vec![d(2021, 1), d(2020, 1)]));
        let s = ReferenceSeries::from_table(&table).unwrap();
        assert_eq!(s.observations()[0], IndexObservation::new(d(2020, 1), 100.0));
    }

    #[test]
    fn table_shape_is_checked() {
        let one = Table::new().with_column("Date", Column::Date(vec![d(2020, 1)]));
        assert!(matches!(
            ReferenceSeries::from_table(&one),
            Err(EscalationError::InvalidInput(_))
        ));

        let two_numeric = Table::new()
            .with_column("A", Column::Numeric(vec![1.0]))
            .with_column("B", Column::Numeric(vec![2.0]));
        assert!(ReferenceSeries::from_table(&two_numeric).is_err());

        let text = Table::new()
            .with_column("Date", Column::Date(vec![d(2020, 1)]))
            .with_column("CPI", Column::Text(vec!["100".to_string()]));
        assert!(ReferenceSeries::from_table(&text).is_err());

        let ragged = Table::new()
            .with_column("Date", Column::Date(vec![d(2020, 1), d(2020, 4)]))
            .with_column("CPI", Column::Numeric(vec![100.0]));
        assert!(ReferenceSeries::from_table(&ragged).is_err());
    }
}
