//! High-level API and defaults for continuity intervals

use crate::bootstrap::{BootstrapEstimator, BootstrapResult};
use splice_core::{Result, TimeSeries};

/// Default number of bootstrap draws per window
pub const DEFAULT_RESAMPLES: usize = 1000;

/// Fast number of draws for quick estimates
pub const FAST_RESAMPLES: usize = 200;

/// High-precision number of draws
pub const HIGH_PRECISION_RESAMPLES: usize = 10000;

/// Default interval: 5th and 95th percentile of the difference distribution
pub const DEFAULT_QUANTILES: [f64; 2] = [0.05, 0.95];

/// Bootstrap interval on the difference between two windows
///
/// # Example
/// ```rust,ignore
/// use splice_confidence::api::*;
///
/// let result = bootstrap_difference(&before, &after, DEFAULT_RESAMPLES, &DEFAULT_QUANTILES, Some(42))?;
/// for ci in &result.intervals {
///     println!("{ci}");
/// }
/// ```
pub fn bootstrap_difference(
    before: &TimeSeries,
    after: &TimeSeries,
    n_samples: usize,
    quantiles: &[f64],
    seed: Option<u64>,
) -> Result<BootstrapResult> {
    let mut estimator = BootstrapEstimator::new(n_samples, quantiles)?;
    if let Some(seed) = seed {
        estimator = estimator.with_seed(seed);
    }
    estimator.estimate(before, after)
}
