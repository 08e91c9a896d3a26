//! Restating a small cash-flow schedule in real terms.
//!
//! Run with `RUST_LOG=debug` to see factor recalculation and extrapolation events.

use chrono::NaiveDate;
use cpi_escalation::core::{EscalatorConfig, to_json_pretty};
use cpi_escalation::escalation::Escalator;
use cpi_escalation::io::{CsvOptions, read_table};

const SERIES: &str = "\
Date,CPI
01/03/2018,111.4
01/06/2018,112.0
01/09/2018,112.6
01/12/2018,113.0
01/03/2019,114.1
01/06/2019,114.8
01/09/2019,115.4
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();

    let table = read_table(SERIES.as_bytes(), &CsvOptions::default()).unwrap();
    let mut esc = Escalator::new(
        &table,
        EscalatorConfig::default().with_target_date(d(2019, 9, 1)),
    )
    .unwrap();

    // 1. Nominal spend restated at the September 2019 basis
    let dates = [d(2017, 7, 1), d(2018, 7, 1), d(2019, 7, 1), d(2021, 7, 1)];
    let spend = [1_000.0, 1_000.0, 1_000.0, 1_000.0];
    let real = esc.to_real(&dates, &spend).unwrap();
    println!("Real terms (basis {}):", esc.target_date().date());
    for (date, value) in dates.iter().zip(real.iter()) {
        println!("  {date}  {value:10.2}");
    }

    // 2. Same schedule at an earlier basis
    esc.set_target_date(d(2018, 12, 1)).unwrap();
    let real = esc.to_real(&dates, &spend).unwrap();
    println!("\nReal terms (basis {}):", esc.target_date().date());
    for (date, value) in dates.iter().zip(real.iter()) {
        println!("  {date}  {value:10.2}");
    }

    // 3. Factor table
    println!("\n{}", to_json_pretty(&esc.snapshot()).unwrap());
}
