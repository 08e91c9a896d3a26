//! Behavioural checks for factor computation, resolution, and extrapolation.

use approx::assert_relative_eq;
use chrono::NaiveDate;

use cpi_escalation::core::{EscalationError, EscalatorConfig, IndexObservation};
use cpi_escalation::dates::DayCountConvention;
use cpi_escalation::escalation::Escalator;
use cpi_escalation::series::{Column, Table};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn two_point_table() -> Table {
    Table::new()
        .with_column("Date", Column::Date(vec![d(2020, 1, 1), d(2021, 1, 1)]))
        .with_column("CPI", Column::Numeric(vec![100.0, 110.0]))
}

/// Quarterly index growing 0.6 % per quarter from 2015 through 2020.
fn quarterly_series() -> Vec<IndexObservation> {
    let mut level = 100.0;
    let mut out = Vec::new();
    for year in 2015..=2020 {
        for month in [3, 6, 9, 12] {
            out.push(IndexObservation::new(d(year, month, 1), level));
            level *= 1.006;
        }
    }
    out
}

fn quarterly(config: EscalatorConfig) -> Escalator {
    Escalator::from_observations(quarterly_series(), config).unwrap()
}

// ── Worked examples ─────────────────────────────────────────────────────────

#[test]
fn two_point_series_factors_and_conversion() {
    let cfg = EscalatorConfig::default().with_target_date(d(2021, 1, 1));
    let esc = Escalator::new(&two_point_table(), cfg).unwrap();

    assert_relative_eq!(esc.factors()[0], 1.10, epsilon = 1.0e-12);
    assert_relative_eq!(esc.factors()[1], 1.00, epsilon = 1.0e-12);

    let real = esc.to_real(&[d(2020, 1, 1)], &[50.0]).unwrap();
    assert_relative_eq!(real[0], 55.0, epsilon = 1.0e-12);
}

#[test]
fn estimation_disabled_rejects_future_date() {
    let cfg = EscalatorConfig::default()
        .with_target_date(d(2021, 1, 1))
        .with_allow_estimation(false);
    let esc = Escalator::new(&two_point_table(), cfg).unwrap();

    let err = esc.to_real(&[d(2022, 1, 1)], &[1.0]).unwrap_err();
    assert_eq!(
        err,
        EscalationError::OutOfRange {
            date: d(2022, 1, 1),
            min: d(2020, 1, 1),
            max: d(2021, 1, 1),
        }
    );
}

#[test]
fn one_year_past_range_discounts_by_rate() {
    let cfg = EscalatorConfig::default()
        .with_target_date(d(2021, 1, 1))
        .with_default_escalation_rate(1.025);
    let esc = Escalator::new(&two_point_table(), cfg).unwrap();

    // 365 days at actual/365.25.
    let expected = 1.025_f64.powf(-365.0 / 365.25);
    let f = esc.factor_at(d(2022, 1, 1)).unwrap();
    assert_relative_eq!(f, expected, epsilon = 1.0e-12);
    assert_relative_eq!(f, 0.9756, epsilon = 1.0e-3);
}

// ── Properties ──────────────────────────────────────────────────────────────

#[test]
fn anchor_row_factor_is_one() {
    let mut esc = quarterly(EscalatorConfig::default());
    let dates: Vec<NaiveDate> = quarterly_series().iter().map(|o| o.date).collect();

    for (i, &target) in dates.iter().enumerate() {
        esc.set_target_date(target).unwrap();
        assert_eq!(esc.factors()[i], 1.0);

        // Any time between two observations anchors on the earlier one.
        let mid = target + chrono::Days::new(20);
        esc.set_target_date(mid).unwrap();
        assert_eq!(esc.factors()[i], 1.0);
    }
}

#[test]
fn to_nominal_inverts_to_real() {
    let esc = quarterly(EscalatorConfig::default().with_target_date(d(2019, 7, 15)));
    let dates = [
        d(2010, 2, 14),
        d(2015, 3, 1),
        d(2017, 11, 30),
        d(2020, 12, 1),
        d(2031, 5, 5),
    ];
    let values = [12.5, 1_000.0, 0.01, 77.7, 3.0e6];

    let real = esc.to_real(&dates, &values).unwrap();
    let back = esc.to_nominal(&dates, &real).unwrap();
    for (orig, round) in values.iter().zip(back.iter()) {
        assert_relative_eq!(*orig, *round, max_relative = 1.0e-12);
    }
}

#[test]
fn retargeting_and_reverting_is_exact() {
    let mut esc = quarterly(EscalatorConfig::default().with_target_date(d(2018, 6, 1)));
    let original = esc.factors().to_vec();

    esc.set_target_date(d(2015, 3, 1)).unwrap();
    assert_ne!(esc.factors(), original.as_slice());
    esc.set_target_date(d(2018, 6, 1)).unwrap();
    assert_eq!(esc.factors(), original.as_slice());
}

#[test]
fn factors_non_increasing_for_rising_index() {
    let last = *quarterly_series().last().unwrap();
    let esc = quarterly(EscalatorConfig::default().with_target_date(last.date));
    assert!(esc.factors().windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(*esc.factors().last().unwrap(), 1.0);
}

#[test]
fn extrapolation_is_continuous_at_boundaries() {
    let esc = quarterly(EscalatorConfig::default().with_target_date(d(2018, 1, 1)));
    let min = esc.min_date();
    let max = esc.max_date();
    let first = esc.factors()[0];
    let last = *esc.factors().last().unwrap();

    assert_eq!(esc.factor_at(min).unwrap(), first);
    assert_eq!(esc.factor_at(max).unwrap(), last);

    let day_before = esc.factor_at(min.pred_opt().unwrap()).unwrap();
    let day_after = esc.factor_at(max.succ_opt().unwrap()).unwrap();
    assert_relative_eq!(day_before, first, max_relative = 1.0e-4);
    assert_relative_eq!(day_after, last, max_relative = 1.0e-4);
    assert!(day_before > first);
    assert!(day_after < last);
}

#[test]
fn within_range_dates_step_to_previous_observation() {
    let esc = quarterly(EscalatorConfig::default().with_target_date(d(2020, 12, 1)));
    let f_obs = esc.factor_at(d(2017, 6, 1)).unwrap();
    for day in [d(2017, 6, 2), d(2017, 7, 31), d(2017, 8, 31)] {
        assert_eq!(esc.factor_at(day).unwrap(), f_obs);
    }
    assert_ne!(esc.factor_at(d(2017, 9, 1)).unwrap(), f_obs);
}

#[test]
fn backward_extrapolation_compounds_rate() {
    let cfg = EscalatorConfig::default()
        .with_target_date(d(2021, 1, 1))
        .with_default_escalation_rate(1.03);
    let esc = Escalator::new(&two_point_table(), cfg).unwrap();

    // 2016-01-01 -> 2020-01-01 is 1461 days: four Julian years.
    let f = esc.factor_at(d(2016, 1, 1)).unwrap();
    assert_relative_eq!(f, 1.10 * 1.03_f64.powi(4), epsilon = 1.0e-12);
}

#[test]
fn day_count_changes_extrapolation_distance() {
    let base = EscalatorConfig::default().with_target_date(d(2021, 1, 1));
    let julian = Escalator::new(&two_point_table(), base).unwrap();
    let act360 = Escalator::new(
        &two_point_table(),
        base.with_day_count(DayCountConvention::Act360),
    )
    .unwrap();

    let date = d(2030, 1, 1);
    assert!(act360.factor_at(date).unwrap() < julian.factor_at(date).unwrap());
    // In-range lookups ignore the day count.
    assert_eq!(
        act360.factor_at(d(2020, 6, 1)).unwrap(),
        julian.factor_at(d(2020, 6, 1)).unwrap()
    );
}

#[test]
fn toggling_estimation_after_construction() {
    let mut esc = Escalator::new(
        &two_point_table(),
        EscalatorConfig::default().with_target_date(d(2021, 1, 1)),
    )
    .unwrap();
    assert!(esc.real_value(d(2025, 1, 1), 10.0).is_ok());

    esc.set_allow_estimation(false);
    assert!(matches!(
        esc.nominal_value(d(2025, 1, 1), 10.0),
        Err(EscalationError::OutOfRange { .. })
    ));
    assert_relative_eq!(
        esc.nominal_value(d(2020, 1, 1), 55.0).unwrap(),
        50.0,
        epsilon = 1.0e-12
    );
}

#[test]
fn invalid_tables_are_rejected() {
    let three = two_point_table().with_column("Extra", Column::Numeric(vec![1.0, 2.0]));
    assert!(matches!(
        Escalator::new(&three, EscalatorConfig::default()),
        Err(EscalationError::InvalidInput(_))
    ));

    let negative = Table::new()
        .with_column("Date", Column::Date(vec![d(2020, 1, 1)]))
        .with_column("CPI", Column::Numeric(vec![-5.0]));
    assert!(matches!(
        Escalator::new(&negative, EscalatorConfig::default()),
        Err(EscalationError::InvalidInput(_))
    ));

    let empty = Table::new()
        .with_column("Date", Column::Date(Vec::new()))
        .with_column("CPI", Column::Numeric(Vec::new()));
    assert!(matches!(
        Escalator::new(&empty, EscalatorConfig::default()),
        Err(EscalationError::InvalidInput(_))
    ));
}
