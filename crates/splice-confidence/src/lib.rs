//! Intervals on the difference between splice boundary windows
//!
//! This crate provides the statistical tests the continuity orchestrator
//! runs over each pair of boundary windows:
//!
//! - **Bootstrap intervals**: paired-draw resampling of per-field mean and
//!   standard deviation, with the full difference distribution retained
//! - **Asymptotic intervals**: a normal approximation for the shift in
//!   means, useful as an analytic reference
//!
//! Both implement [`ContinuityTest`], the seam used to configure which
//! tests are run.

pub mod api;
mod asymptotic;
mod bootstrap;
mod traits;
mod types;

pub use api::{
    bootstrap_difference, DEFAULT_QUANTILES, DEFAULT_RESAMPLES, FAST_RESAMPLES,
    HIGH_PRECISION_RESAMPLES,
};
pub use asymptotic::AsymptoticMeanShift;
pub use bootstrap::{BootstrapEstimator, BootstrapResult};
pub use traits::ContinuityTest;
pub use types::{BootstrapDistribution, IntervalEstimate, Statistic, StatisticKey, TestOutput};
