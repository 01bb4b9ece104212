//! Core types for station splice continuity analysis
//!
//! This crate holds the pieces every other splice crate builds on:
//!
//! - [`station`]: station identities, splice groups and their expansion into
//!   consecutive pairs
//! - [`series`]: the [`TimeSeries`] abstraction (date-range slicing,
//!   period resampling, nearest-date lookup)
//! - [`moments`]: NaN-aware mean, standard deviation and quantiles
//! - [`execution`]: sequential and parallel batch engines
//!
//! # Example
//!
//! ```rust
//! use splice_core::{pairs_from_rows, SpliceGroupRow, StationId};
//!
//! let rows = vec![
//!     SpliceGroupRow::new(1, StationId::new("725300", "94846")),
//!     SpliceGroupRow::new(1, StationId::new("725340", "14819")),
//!     SpliceGroupRow::new(1, StationId::new("725346", "99999")),
//! ];
//! let pairs = pairs_from_rows(&rows).unwrap();
//! assert_eq!(pairs.len(), 2);
//! ```

pub mod error;
pub mod execution;
pub mod moments;
pub mod series;
pub mod station;

pub use error::{Error, Result};
pub use execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};
pub use series::{Aggregator, MatchPolicy, SeriesSource, StationSeriesSet, TimeSeries};
pub use station::{
    expand_pairs, groups_from_rows, pairs_from_rows, SpliceGroup, SpliceGroupRow, SplicePair,
    StationId,
};

/// Length of one resampling period, in days
pub const DAYS_PER_PERIOD: i64 = 365;
