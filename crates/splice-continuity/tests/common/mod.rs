//! Shared utilities for integration tests

#![allow(dead_code)]

use std::f64::consts::PI;

use chrono::{Duration, NaiveDate};
use splice_core::{StationId, TimeSeries};
use tracing_subscriber::EnvFilter;

/// Length of one synthetic temperature cycle, in days
pub const CYCLE_DAYS: usize = 3 * 365;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(1985, 1, 1).unwrap()
}

pub fn station(primary: &str) -> StationId {
    StationId::new(primary, "99999")
}

/// Daily series oscillating around `level` with a three-year period
///
/// Any run of `CYCLE_DAYS` consecutive days has mean `level`.
pub fn cyclic_series(id: StationId, start_day: i64, days: usize, level: f64) -> TimeSeries {
    let start = base() + Duration::days(start_day);
    let dates = (0..days).map(|i| start + Duration::days(i as i64)).collect();
    let phase = start_day.rem_euclid(CYCLE_DAYS as i64) as usize;
    let temp = (0..days)
        .map(|i| level + (2.0 * PI * ((phase + i) % CYCLE_DAYS) as f64 / CYCLE_DAYS as f64).sin())
        .collect();
    TimeSeries::new(id, vec!["temp_f_mean".into()], dates, vec![temp]).unwrap()
}
