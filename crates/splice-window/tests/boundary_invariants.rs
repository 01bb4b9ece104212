//! Alignment and window invariants over generated series

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use splice_core::{MatchPolicy, StationId, TimeSeries};
use splice_window::{extract_window, BoundaryWindows, SeriesAligner, WindowEnd};

fn series(id: &str, start: NaiveDate, days: usize, step: usize) -> TimeSeries {
    let dates: Vec<_> = (0..days)
        .step_by(step.max(1))
        .map(|i| start + Duration::days(i as i64))
        .collect();
    let values = dates.iter().enumerate().map(|(i, _)| i as f64).collect();
    TimeSeries::new(StationId::new(id, "99999"), vec!["temp".into()], dates, vec![values]).unwrap()
}

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(1973, 1, 1).unwrap()
}

#[test]
fn test_ten_year_records_with_two_year_overlap() {
    let a = series("a", base(), 3650, 1);
    let b = series("b", base() + Duration::days(8 * 365), 3650, 1);

    let aligned = SeriesAligner::new(MatchPolicy::Next).align(&b, &a).unwrap();
    assert_eq!(aligned.early.station().primary, "a");
    assert_eq!(aligned.boundary, a.last_date().unwrap());
    // Two overlapping years removed from the late side
    assert_eq!(aligned.late.len(), 3650 - 2 * 365 + 1);

    let windows = BoundaryWindows::from_aligned(&aligned, 3).unwrap();
    assert_eq!(windows.before.resampled.len(), 3);
    assert_eq!(windows.after.resampled.len(), 3);
    assert_eq!(windows.before.stop, aligned.boundary);
    assert_eq!(windows.after.start, aligned.boundary);
}

proptest! {
    #[test]
    fn prop_truncated_late_series_starts_at_boundary(
        early_days in 30usize..2000,
        late_offset in 0i64..2500,
        late_days in 30usize..2000,
        step in 1usize..5,
    ) {
        let a = series("a", base(), early_days, step);
        let b = series("b", base() + Duration::days(late_offset), late_days, step);
        if let Ok(aligned) = SeriesAligner::new(MatchPolicy::Next).align(&a, &b) {
            prop_assert!(aligned.late.dates().iter().all(|d| *d >= aligned.boundary));
            prop_assert!(aligned.early.last_date().unwrap() <= aligned.late.last_date().unwrap());
        }
    }

    #[test]
    fn prop_window_records_stay_in_range(
        days in 1usize..4000,
        years in 1u32..6,
        step in 1usize..4,
        last in any::<bool>(),
    ) {
        let s = series("a", base(), days, step);
        let end = if last { WindowEnd::Last } else { WindowEnd::First };
        let w = extract_window(&s, end, years).unwrap();
        let span = years as i64 * 365 - 1;
        prop_assert_eq!((w.stop - w.start).num_days(), span);
        match end {
            WindowEnd::Last => prop_assert_eq!(Some(w.stop), s.last_date()),
            WindowEnd::First => prop_assert_eq!(Some(w.start), s.first_date()),
        }
        for d in w.raw.dates() {
            prop_assert!(*d >= w.start && *d <= w.stop);
        }
        prop_assert!(w.resampled.len() <= years as usize);
    }
}
