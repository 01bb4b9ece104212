//! Ordering two series around their splice boundary
//!
//! The series whose record ends first is the "early" side; its last date is
//! the presumed splice boundary. The late series is then truncated to start
//! at the date matching that boundary so any overlap is dropped before
//! windows are taken.

use chrono::NaiveDate;
use splice_core::{Error, MatchPolicy, Result, TimeSeries};
use tracing::{debug, instrument};

/// Two series ordered by end date, late side truncated at the boundary
#[derive(Debug, Clone)]
pub struct AlignedPair<'a> {
    /// Series whose last record comes first
    pub early: &'a TimeSeries,
    /// Later series, starting at the boundary match
    pub late: TimeSeries,
    /// Last date of the early series
    pub boundary: NaiveDate,
    /// True when the inputs were given late-first
    pub swapped: bool,
}

/// Ordered references to two series and the early series' last date
#[derive(Debug, Clone, Copy)]
pub struct EndOrdering<'a> {
    pub early: &'a TimeSeries,
    pub late: &'a TimeSeries,
    pub boundary: NaiveDate,
    pub swapped: bool,
}

/// Label two series early/late by their last date
///
/// When both end on the same date the input order is kept: `first` is
/// early.
pub fn order_by_end<'a>(first: &'a TimeSeries, second: &'a TimeSeries) -> Result<EndOrdering<'a>> {
    let end_of = |s: &TimeSeries| {
        s.last_date().ok_or(Error::InsufficientData {
            expected: 1,
            actual: 0,
        })
    };
    let (a, b) = (end_of(first)?, end_of(second)?);
    Ok(if b < a {
        EndOrdering {
            early: second,
            late: first,
            boundary: b,
            swapped: true,
        }
    } else {
        EndOrdering {
            early: first,
            late: second,
            boundary: a,
            swapped: false,
        }
    })
}

/// Aligns pairs of series under a fixed match policy
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAligner {
    policy: MatchPolicy,
}

impl SeriesAligner {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Order the series and cut the late one at the boundary match
    #[instrument(skip(self, first, second), fields(
        first = %first.station(),
        second = %second.station(),
        policy = %self.policy,
    ))]
    pub fn align<'a>(&self, first: &'a TimeSeries, second: &'a TimeSeries) -> Result<AlignedPair<'a>> {
        let ordering = order_by_end(first, second)?;
        let start = ordering.late.nearest_index(ordering.boundary, self.policy)?;
        let late = ordering.late.slice_from(start);

        debug!(
            boundary = %ordering.boundary,
            dropped = start,
            remaining = late.len(),
            "truncated late series"
        );

        Ok(AlignedPair {
            early: ordering.early,
            late,
            boundary: ordering.boundary,
            swapped: ordering.swapped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use splice_core::StationId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(id: &str, start: NaiveDate, days: usize) -> TimeSeries {
        let dates = (0..days).map(|i| start + Duration::days(i as i64)).collect();
        TimeSeries::new(
            StationId::new(id, "99999"),
            vec!["temp".into()],
            dates,
            vec![vec![0.0; days]],
        )
        .unwrap()
    }

    #[test]
    fn test_orders_by_last_date() {
        let a = span("a", date(2000, 1, 1), 100);
        let b = span("b", date(2000, 2, 1), 100);

        let o = order_by_end(&b, &a).unwrap();
        assert_eq!(o.early.station().primary, "a");
        assert_eq!(o.late.station().primary, "b");
        assert_eq!(o.boundary, a.last_date().unwrap());
        assert!(o.swapped);

        let o = order_by_end(&a, &b).unwrap();
        assert_eq!(o.early.station().primary, "a");
        assert!(!o.swapped);
    }

    #[test]
    fn test_tie_keeps_input_order() {
        let a = span("a", date(2000, 1, 1), 100);
        let b = span("b", date(2000, 1, 11), 90);
        assert_eq!(a.last_date(), b.last_date());

        let o = order_by_end(&a, &b).unwrap();
        assert_eq!(o.early.station().primary, "a");
        let o = order_by_end(&b, &a).unwrap();
        assert_eq!(o.early.station().primary, "b");
    }

    #[test]
    fn test_align_truncates_overlap() {
        let early = span("a", date(2000, 1, 1), 365);
        let late = span("b", date(2000, 7, 1), 365);
        let aligned = SeriesAligner::default().align(&early, &late).unwrap();

        assert_eq!(aligned.boundary, date(2000, 12, 30));
        assert_eq!(aligned.late.first_date(), Some(date(2000, 12, 30)));
        assert!(aligned.late.dates().iter().all(|d| *d >= aligned.boundary));
    }

    #[test]
    fn test_align_with_gap_uses_next_record() {
        let early = span("a", date(2000, 1, 1), 10);
        let late = span("b", date(2000, 3, 1), 10);
        let aligned = SeriesAligner::new(MatchPolicy::Next).align(&early, &late).unwrap();
        assert_eq!(aligned.late.len(), 10);

        let err = SeriesAligner::new(MatchPolicy::Previous)
            .align(&early, &late)
            .unwrap_err();
        assert!(matches!(err, Error::Alignment { .. }));
    }

    #[test]
    fn test_empty_series_rejected() {
        let a = span("a", date(2000, 1, 1), 0);
        let b = span("b", date(2000, 1, 1), 5);
        assert!(matches!(
            SeriesAligner::default().align(&a, &b),
            Err(Error::InsufficientData { .. })
        ));
    }
}
