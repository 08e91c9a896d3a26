//! Nominal/real conversion against a reference price index.
//!
//! An [`Escalator`] holds a validated index series, a target date, and one
//! escalation factor per reference row:
//!
//! `factor[i] = index(anchor) / index[i]`
//!
//! where the anchor is the latest observation on or before the target date.
//! Multiplying a nominal amount by its date's factor restates it in
//! target-date (real) terms; dividing goes the other way.
//!
//! Caller dates inside the reference range inherit the factor of the most
//! recent observation on or before them. Dates outside it are extrapolated
//! from the nearest boundary row at `default_escalation_rate` per year, unless
//! estimation is disabled, in which case the whole batch is rejected.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::core::{
    DateInput, EscalationError, EscalationRow, EscalationSnapshot, EscalatorConfig,
    IndexObservation, ResolvedFactor,
};
use crate::dates::DayCountConvention;
use crate::escalation::estimate_factor;
use crate::io::{CsvOptions, read_table_from_path};
use crate::series::{ReferenceSeries, Table};

/// Converts values between nominal and target-date (real) terms.
///
/// # Examples
/// ```rust
/// use chrono::NaiveDate;
/// use cpi_escalation::escalation::Escalator;
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
/// let esc = Escalator::builder()
///     .observations(vec![(d(2020), 100.0).into(), (d(2021), 110.0).into()])
///     .target_date(d(2021))
///     .build()
///     .unwrap();
///
/// let real = esc.to_real(&[d(2020)], &[50.0]).unwrap();
/// assert!((real[0] - 55.0).abs() < 1.0e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Escalator {
    series: ReferenceSeries,
    factors: Vec<f64>,
    target_date: NaiveDateTime,
    default_escalation_rate: f64,
    allow_estimation: bool,
    day_count: DayCountConvention,
}

impl Escalator {
    /// Starts an escalator builder.
    #[inline]
    pub fn builder() -> EscalatorBuilder {
        EscalatorBuilder::default()
    }

    /// Builds an escalator from a two-column (date, numeric) table.
    ///
    /// # Errors
    /// - [`EscalationError::InvalidInput`] for a malformed table or configuration.
    /// - [`EscalationError::NoAnchor`] when the target date precedes every observation.
    pub fn new(table: &Table, config: EscalatorConfig) -> Result<Self, EscalationError> {
        Self::from_series(ReferenceSeries::from_table(table)?, config)
    }

    /// Builds an escalator from typed observations in any order.
    pub fn from_observations(
        observations: Vec<IndexObservation>,
        config: EscalatorConfig,
    ) -> Result<Self, EscalationError> {
        Self::from_series(ReferenceSeries::new(observations)?, config)
    }

    /// Builds an escalator from an already validated series.
    ///
    /// A missing `config.target_date` resolves to the current local time.
    pub fn from_series(
        series: ReferenceSeries,
        config: EscalatorConfig,
    ) -> Result<Self, EscalationError> {
        config.validate()?;
        let target_date = config
            .target_date
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        let factors = compute_factors(&series, target_date)?;

        Ok(Self {
            series,
            factors,
            target_date,
            default_escalation_rate: config.default_escalation_rate,
            allow_estimation: config.allow_estimation,
            day_count: config.day_count,
        })
    }

    /// Loads the reference table from a delimited text file.
    ///
    /// # Errors
    /// [`EscalationError::Io`] if the file cannot be read, otherwise as [`Escalator::new`].
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        options: &CsvOptions,
        config: EscalatorConfig,
    ) -> Result<Self, EscalationError> {
        let table = read_table_from_path(path, options)?;
        Self::new(&table, config)
    }

    /// Moves the real-terms basis and recomputes every factor.
    ///
    /// Plain dates are read as midnight. On error the previous target date and
    /// factors are kept.
    ///
    /// # Errors
    /// [`EscalationError::NoAnchor`] if `date` precedes every observation.
    pub fn set_target_date<D: DateInput>(&mut self, date: D) -> Result<(), EscalationError> {
        let target_date = date.into_date_time();
        self.factors = compute_factors(&self.series, target_date)?;
        self.target_date = target_date;
        Ok(())
    }

    pub fn target_date(&self) -> NaiveDateTime {
        self.target_date
    }

    pub fn min_date(&self) -> NaiveDate {
        self.series.min_date()
    }

    pub fn max_date(&self) -> NaiveDate {
        self.series.max_date()
    }

    pub fn default_escalation_rate(&self) -> f64 {
        self.default_escalation_rate
    }

    pub fn allow_estimation(&self) -> bool {
        self.allow_estimation
    }

    pub fn set_allow_estimation(&mut self, allow: bool) {
        self.allow_estimation = allow;
    }

    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    pub fn series(&self) -> &ReferenceSeries {
        &self.series
    }

    /// Per-row factors aligned with [`ReferenceSeries::observations`].
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Reference rows with their current factors.
    pub fn rows(&self) -> Vec<EscalationRow> {
        self.series
            .observations()
            .iter()
            .zip(self.factors.iter())
            .map(|(o, &escalation_factor)| EscalationRow {
                date: o.date,
                index_value: o.value,
                escalation_factor,
            })
            .collect()
    }

    /// Serializable view of the configuration and factor table.
    pub fn snapshot(&self) -> EscalationSnapshot {
        EscalationSnapshot {
            config: EscalatorConfig {
                target_date: Some(self.target_date),
                default_escalation_rate: self.default_escalation_rate,
                allow_estimation: self.allow_estimation,
                day_count: self.day_count,
            },
            rows: self.rows(),
        }
    }

    /// Resolves one factor per `(date, value)` pair, preserving input order.
    ///
    /// # Errors
    /// - [`EscalationError::LengthMismatch`] if the slices differ in length.
    /// - [`EscalationError::OutOfRange`] for the first date outside the reference range
    ///   when estimation is disabled; no partial result is returned.
    ///
    /// Date-time inputs resolve on their calendar date.
    pub fn resolve_factors<D: DateInput + Copy>(
        &self,
        dates: &[D],
        values: &[f64],
    ) -> Result<Vec<ResolvedFactor>, EscalationError> {
        if dates.len() != values.len() {
            return Err(EscalationError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        if !self.allow_estimation {
            if let Some(date) = dates
                .iter()
                .map(|&d| d.into_date())
                .find(|&d| !self.series.contains(d))
            {
                return Err(self.out_of_range(date));
            }
        }

        let resolved: Vec<ResolvedFactor> = dates
            .iter()
            .zip(values.iter())
            .map(|(&date, &value)| {
                let date = date.into_date();
                let (factor, estimated) = self.lookup(date);
                ResolvedFactor {
                    date,
                    value,
                    factor,
                    estimated,
                }
            })
            .collect();

        let estimated = resolved.iter().filter(|r| r.estimated).count();
        if estimated > 0 {
            debug!(
                estimated,
                total = resolved.len(),
                rate = self.default_escalation_rate,
                "extrapolated factors outside reference range"
            );
        }
        Ok(resolved)
    }

    /// Factor for a single date, with the same range policy as [`Escalator::resolve_factors`].
    pub fn factor_at<D: DateInput>(&self, date: D) -> Result<f64, EscalationError> {
        let date = date.into_date();
        if !self.allow_estimation && !self.series.contains(date) {
            return Err(self.out_of_range(date));
        }
        Ok(self.lookup(date).0)
    }

    /// Restates nominal `values` in target-date terms: `value * factor`.
    pub fn to_real<D: DateInput + Copy>(
        &self,
        dates: &[D],
        values: &[f64],
    ) -> Result<Vec<f64>, EscalationError> {
        Ok(self
            .resolve_factors(dates, values)?
            .iter()
            .map(ResolvedFactor::real)
            .collect())
    }

    /// Restates real `values` as nominal amounts at each date: `value / factor`.
    pub fn to_nominal<D: DateInput + Copy>(
        &self,
        dates: &[D],
        values: &[f64],
    ) -> Result<Vec<f64>, EscalationError> {
        Ok(self
            .resolve_factors(dates, values)?
            .iter()
            .map(ResolvedFactor::nominal)
            .collect())
    }

    pub fn real_value<D: DateInput>(&self, date: D, value: f64) -> Result<f64, EscalationError> {
        Ok(value * self.factor_at(date)?)
    }

    pub fn nominal_value<D: DateInput>(&self, date: D, value: f64) -> Result<f64, EscalationError> {
        Ok(value / self.factor_at(date)?)
    }

    /// Returns `(factor, estimated)` for `date`.
    fn lookup(&self, date: NaiveDate) -> (f64, bool) {
        let last = self.factors.len() - 1;
        if date < self.series.min_date() {
            let factor = self.extrapolate(0, date);
            trace!(%date, factor, "backward estimate");
            (factor, true)
        } else if date > self.series.max_date() {
            let factor = self.extrapolate(last, date);
            trace!(%date, factor, "forward estimate");
            (factor, true)
        } else {
            // date >= min_date, so an anchor always exists.
            let idx = self.series.anchor_index(date).unwrap_or(0);
            (self.factors[idx], false)
        }
    }

    fn extrapolate(&self, row: usize, date: NaiveDate) -> f64 {
        estimate_factor(
            self.series.observations()[row].date,
            self.factors[row],
            date,
            self.default_escalation_rate,
            self.day_count,
        )
    }

    fn out_of_range(&self, date: NaiveDate) -> EscalationError {
        EscalationError::OutOfRange {
            date,
            min: self.series.min_date(),
            max: self.series.max_date(),
        }
    }
}

/// `target_index / index[i]` for every row, anchored at the latest row on or before `target_date`.
fn compute_factors(
    series: &ReferenceSeries,
    target_date: NaiveDateTime,
) -> Result<Vec<f64>, EscalationError> {
    let anchor = series
        .anchor_index(target_date.date())
        .ok_or_else(|| EscalationError::NoAnchor {
            target: target_date,
            earliest: series.min_date(),
        })?;
    let observations = series.observations();
    let target_index = observations[anchor].value;

    debug!(
        %target_date,
        anchor_date = %observations[anchor].date,
        target_index,
        rows = observations.len(),
        "recalculated escalation factors"
    );

    Ok(observations.iter().map(|o| target_index / o.value).collect())
}

#[derive(Debug, Clone)]
enum SeriesSource {
    Table(Table),
    Observations(Vec<IndexObservation>),
}

/// Builder for [`Escalator`].
#[derive(Debug, Clone, Default)]
pub struct EscalatorBuilder {
    source: Option<SeriesSource>,
    config: EscalatorConfig,
}

impl EscalatorBuilder {
    /// Uses a two-column table as the reference series.
    pub fn table(mut self, table: Table) -> Self {
        self.source = Some(SeriesSource::Table(table));
        self
    }

    /// Uses typed observations as the reference series.
    pub fn observations(mut self, observations: Vec<IndexObservation>) -> Self {
        self.source = Some(SeriesSource::Observations(observations));
        self
    }

    /// Replaces every setting at once.
    pub fn config(mut self, config: EscalatorConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn target_date<D: DateInput>(mut self, date: D) -> Self {
        self.config.target_date = Some(date.into_date_time());
        self
    }

    #[inline]
    pub fn default_escalation_rate(mut self, rate: f64) -> Self {
        self.config.default_escalation_rate = rate;
        self
    }

    #[inline]
    pub fn allow_estimation(mut self, allow: bool) -> Self {
        self.config.allow_estimation = allow;
        self
    }

    #[inline]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.config.day_count = day_count;
        self
    }

    /// Validates and builds an [`Escalator`].
    ///
    /// # Errors
    /// Returns [`EscalationError::InvalidInput`] when no series was supplied, plus
    /// anything [`Escalator::from_series`] can return.
    pub fn build(self) -> Result<Escalator, EscalationError> {
        let series = match self.source {
            Some(SeriesSource::Table(table)) => ReferenceSeries::from_table(&table)?,
            Some(SeriesSource::Observations(obs)) => ReferenceSeries::new(obs)?,
            None => return Err(EscalationError::invalid("reference series is required")),
        };
        Escalator::from_series(series, self.config)
    }
}
