use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One published index value.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexObservation {
    /// Observation (publication reference) date.
    pub date: NaiveDate,
    /// Index level; must be strictly positive.
    pub value: f64,
}

impl IndexObservation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(NaiveDate, f64)> for IndexObservation {
    fn from((date, value): (NaiveDate, f64)) -> Self {
        Self { date, value }
    }
}

/// Reference row together with its factor for the current target date.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EscalationRow {
    pub date: NaiveDate,
    pub index_value: f64,
    /// `index(target) / index(date)`; multiply a nominal amount by this to get real terms.
    pub escalation_factor: f64,
}

/// Caller date and value paired with the factor resolved for that date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFactor {
    pub date: NaiveDate,
    pub value: f64,
    pub factor: f64,
    /// True when the factor was extrapolated outside the reference range.
    pub estimated: bool,
}

impl ResolvedFactor {
    /// Value expressed in target-date (real) terms.
    #[inline]
    pub fn real(&self) -> f64 {
        self.value * self.factor
    }

    /// Value expressed in as-spent (nominal) terms.
    #[inline]
    pub fn nominal(&self) -> f64 {
        self.value / self.factor
    }
}

/// Calendar inputs accepted as target and caller dates.
///
/// Plain dates are read as midnight.
pub trait DateInput {
    fn into_date_time(self) -> NaiveDateTime;

    /// Calendar date, dropping any time of day.
    fn into_date(self) -> NaiveDate
    where
        Self: Sized,
    {
        self.into_date_time().date()
    }
}

impl DateInput for NaiveDate {
    fn into_date_time(self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }
}

impl DateInput for NaiveDateTime {
    fn into_date_time(self) -> NaiveDateTime {
        self
    }
}
