//! Invariants of slicing, lookup and resampling

mod common;

use chrono::Duration;
use common::*;
use proptest::prelude::*;
use splice_core::{moments, MatchPolicy, DAYS_PER_PERIOD};

#[test]
fn test_resample_is_idempotent() {
    let s = daily_series(station(1), date(1990, 1, 1), 2000, |i| (i % 17) as f64);
    let a = s.resample(DAYS_PER_PERIOD, moments::mean).unwrap();
    let b = s.resample(DAYS_PER_PERIOD, moments::mean).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_missing_values_do_not_poison_periods() {
    let s = daily_series(station(1), date(1990, 1, 1), 730, |i| {
        if i % 2 == 0 { f64::NAN } else { 10.0 }
    });
    let r = s.resample(DAYS_PER_PERIOD, moments::mean).unwrap();
    assert_eq!(r.len(), 2);
    for v in r.column("temp_f_mean").unwrap() {
        assert_relative_eq!(*v, 10.0);
    }
}

proptest! {
    #[test]
    fn prop_next_policy_never_points_before_boundary(
        days in 1usize..400,
        offset in -50i64..450,
    ) {
        let start = date(2000, 1, 1);
        let s = daily_series(station(2), start, days, |i| i as f64);
        let boundary = start + Duration::days(offset);
        match s.nearest_index(boundary, MatchPolicy::Next) {
            Ok(i) => {
                prop_assert!(s.dates()[i] >= boundary);
                prop_assert!(i == 0 || s.dates()[i - 1] < boundary);
            }
            Err(_) => prop_assert!(s.last_date().unwrap() < boundary),
        }
    }

    #[test]
    fn prop_resample_periods_cover_all_records(days in 1usize..1500) {
        let s = daily_series(station(3), date(1985, 6, 1), days, |_| 1.0);
        let r = s.resample(DAYS_PER_PERIOD, moments::mean).unwrap();
        let expected = (days - 1) / DAYS_PER_PERIOD as usize + 1;
        prop_assert_eq!(r.len(), expected);
        prop_assert_eq!(r.last_date(), s.last_date());
        prop_assert!(r.first_date().unwrap() >= s.first_date().unwrap());
    }
}
