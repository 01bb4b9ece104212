//! Continuity testing for spliced weather-station records
//!
//! Facade over the `splice-*` crates:
//!
//! - [`splice_core`]: station identities, splice groups, time series, errors
//! - [`splice_window`]: boundary alignment and window extraction
//! - [`splice_confidence`]: bootstrap and asymptotic difference intervals
//! - [`splice_continuity`]: configuration, per-pair orchestration, batch runs
//! - `splice_polars` (feature `polars`): DataFrame readers and writers

pub use splice_confidence;
pub use splice_continuity;
pub use splice_core;
pub use splice_window;

#[cfg(feature = "polars")]
pub use splice_polars;

pub mod prelude {
    pub use splice_confidence::{
        AsymptoticMeanShift, BootstrapEstimator, ContinuityTest, IntervalEstimate, Statistic,
        TestOutput,
    };
    pub use splice_continuity::{BatchReport, BatchRunner, ContinuityConfig, PairStatus, TestKind};
    pub use splice_core::{
        Error, MatchPolicy, Result, SeriesSource, SpliceGroup, SplicePair, StationId,
        StationSeriesSet, TimeSeries,
    };
    pub use splice_window::{extract_window, SeriesAligner, WindowEnd};
}
