//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use chrono::{Duration, NaiveDate};
use splice_core::{StationId, TimeSeries};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn station(n: usize) -> StationId {
    StationId::new(format!("{:06}", 720000 + n), "99999")
}

/// One-field daily series starting at `start`, value `f(day_index)`
pub fn daily_series(id: StationId, start: NaiveDate, days: usize, f: impl Fn(usize) -> f64) -> TimeSeries {
    let dates = (0..days).map(|i| start + Duration::days(i as i64)).collect();
    let values = (0..days).map(f).collect();
    TimeSeries::new(id, vec!["temp_f_mean".into()], dates, vec![values]).unwrap()
}
