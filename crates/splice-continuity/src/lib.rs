//! Continuity testing across station splice boundaries
//!
//! Ties the other splice crates together. For every splice pair the
//! [`BatchRunner`] looks up both station series, aligns them at the
//! boundary, takes a window on each side, runs the configured
//! [`ContinuityTest`](splice_confidence::ContinuityTest)s and collects the
//! result into a [`BatchReport`].
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use splice_continuity::{BatchRunner, ContinuityConfig};
//! use splice_core::{SplicePair, StationId, StationSeriesSet, TimeSeries};
//!
//! let daily = |id: &str, offset: i64| {
//!     let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset);
//!     let dates = (0..1500).map(|i| start + Duration::days(i)).collect();
//!     let temp = (0..1500).map(|i| 50.0 + (i % 9) as f64).collect();
//!     TimeSeries::new(StationId::new(id, "99999"), vec!["temp".into()], dates, vec![temp]).unwrap()
//! };
//! let source: StationSeriesSet = [daily("724940", 0), daily("724945", 1400)].into_iter().collect();
//! let pair = SplicePair::new(
//!     1,
//!     StationId::new("724940", "99999"),
//!     StationId::new("724945", "99999"),
//! );
//!
//! let config = ContinuityConfig {
//!     window_years: 2,
//!     n_samples: 200,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let report = BatchRunner::new(config).unwrap().run(&[pair], &source).unwrap();
//! assert_eq!(report.evaluated().count(), 1);
//! ```

pub mod batch;
pub mod config;
pub mod report;
pub mod suite;

pub use batch::BatchRunner;
pub use config::{ContinuityConfig, TestKind, DEFAULT_WINDOW_YEARS};
pub use report::{BatchReport, PairOutcome, PairStatus, ResultRow};
pub use suite::{test_suite, window_test, WindowTestResult};
