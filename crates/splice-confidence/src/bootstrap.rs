//! Paired-draw bootstrap of window statistics
//!
//! Each window is resampled with replacement to its own row count `N`
//! times, and every draw is reduced to the per-field mean and standard
//! deviation. Draw `i` of the after window is paired with draw `i` of the
//! before window; their difference forms the empirical distribution whose
//! quantiles give the interval.
//!
//! Draws are independent tasks: draw `i` on window `w` uses its own
//! ChaCha generator keyed by `(seed, i)` on stream `w`, so a fixed seed gives
//! identical results whichever engine runs the batch, and neighbouring seeds
//! share no draws.

use crate::api::{DEFAULT_QUANTILES, DEFAULT_RESAMPLES};
use crate::traits::{check_matching_fields, ContinuityTest};
use crate::types::{BootstrapDistribution, IntervalEstimate, Statistic, StatisticKey, TestOutput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use splice_core::{moments, Error, ExecutionEngine, Result, SequentialEngine, TimeSeries};
use tracing::{debug, instrument};

const BEFORE_STREAM: u64 = 0;
const AFTER_STREAM: u64 = 1;

/// Result of bootstrap interval estimation
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// One interval per (field, statistic)
    pub intervals: Vec<IntervalEstimate>,
    /// After-minus-before statistic for every draw
    pub difference: BootstrapDistribution,
    /// Number of draws performed
    pub n_samples: usize,
    /// Seed the draws were generated from
    pub seed: u64,
}

/// Bootstrap estimator for the difference of window statistics
#[derive(Debug, Clone)]
pub struct BootstrapEstimator<E = SequentialEngine> {
    engine: E,
    n_samples: usize,
    quantiles: Vec<f64>,
    seed: Option<u64>,
}

impl Default for BootstrapEstimator<SequentialEngine> {
    fn default() -> Self {
        Self {
            engine: SequentialEngine,
            n_samples: DEFAULT_RESAMPLES,
            quantiles: DEFAULT_QUANTILES.to_vec(),
            seed: None,
        }
    }
}

impl BootstrapEstimator<SequentialEngine> {
    /// Create an estimator drawing `n_samples` resamples per window
    pub fn new(n_samples: usize, quantiles: &[f64]) -> Result<Self> {
        Self::default()
            .with_resamples(n_samples)?
            .with_quantiles(quantiles)
    }
}

impl<E: ExecutionEngine> BootstrapEstimator<E> {
    /// Run draws on a different engine
    pub fn with_engine<F: ExecutionEngine>(self, engine: F) -> BootstrapEstimator<F> {
        BootstrapEstimator {
            engine,
            n_samples: self.n_samples,
            quantiles: self.quantiles,
            seed: self.seed,
        }
    }

    /// Set the number of draws per window
    pub fn with_resamples(mut self, n_samples: usize) -> Result<Self> {
        if n_samples == 0 {
            return Err(Error::InvalidParameter(
                "Number of bootstrap samples must be positive".to_string(),
            ));
        }
        self.n_samples = n_samples;
        Ok(self)
    }

    /// Set the probabilities reported for each difference distribution
    pub fn with_quantiles(mut self, quantiles: &[f64]) -> Result<Self> {
        if quantiles.is_empty() {
            return Err(Error::InvalidParameter(
                "At least one quantile is required".to_string(),
            ));
        }
        for &q in quantiles {
            moments::validate_probability(q)?;
        }
        self.quantiles = quantiles.to_vec();
        Ok(self)
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Column layout of a statistics row: mean then std for each field
    pub fn statistic_keys(fields: &[String]) -> Vec<StatisticKey> {
        fields
            .iter()
            .flat_map(|f| {
                [
                    StatisticKey::new(f.clone(), Statistic::Mean),
                    StatisticKey::new(f.clone(), Statistic::Std),
                ]
            })
            .collect()
    }

    /// Resample `window` `n_samples` times and reduce each draw to statistics
    ///
    /// Returns one row per draw laid out as [`Self::statistic_keys`]. An empty
    /// window yields all-NaN rows.
    pub fn sample_statistics(&self, window: &TimeSeries, seed: u64, stream: u64) -> Vec<Vec<f64>> {
        let n = window.len();
        let columns = window.columns();

        self.engine.execute_batch(self.n_samples, |draw| {
            if n == 0 {
                return vec![f64::NAN; 2 * columns.len()];
            }
            let mut rng = draw_rng(seed, draw as u64, stream);
            let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            let mut resampled = Vec::with_capacity(n);
            let mut row = Vec::with_capacity(2 * columns.len());
            for column in columns {
                resampled.clear();
                resampled.extend(indices.iter().map(|&i| column[i]));
                row.push(moments::mean(&resampled));
                row.push(moments::std_dev(&resampled));
            }
            row
        })
    }

    /// Interval on `after - before` for every field's mean and std
    #[instrument(skip(self, before, after), fields(
        n_before = before.len(),
        n_after = after.len(),
        n_samples = self.n_samples,
    ))]
    pub fn estimate(&self, before: &TimeSeries, after: &TimeSeries) -> Result<BootstrapResult> {
        check_matching_fields(before, after)?;
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());

        debug!("Generating {} bootstrap draws per window (seed {})", self.n_samples, seed);

        let stats_before = self.sample_statistics(before, seed, BEFORE_STREAM);
        let stats_after = self.sample_statistics(after, seed, AFTER_STREAM);

        let rows: Vec<Vec<f64>> = stats_after
            .iter()
            .zip(&stats_before)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x - y).collect())
            .collect();

        let keys = Self::statistic_keys(before.fields());
        let intervals = keys
            .iter()
            .enumerate()
            .map(|(j, key)| {
                let column: Vec<f64> = rows.iter().map(|r| r[j]).collect();
                let bounds = moments::quantiles(&column, &self.quantiles)?;
                Ok(IntervalEstimate::new(key.clone(), self.quantiles.clone(), bounds))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Bootstrap completed with {} intervals", intervals.len());

        Ok(BootstrapResult {
            intervals,
            difference: BootstrapDistribution::new(keys, rows),
            n_samples: self.n_samples,
            seed,
        })
    }
}

/// Generator for one draw, keyed by both the seed and the draw index
fn draw_rng(seed: u64, draw: u64, stream: u64) -> ChaCha8Rng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&draw.to_le_bytes());
    let mut rng = ChaCha8Rng::from_seed(key);
    rng.set_stream(stream);
    rng
}

impl<E: ExecutionEngine> ContinuityTest for BootstrapEstimator<E> {
    fn name(&self) -> &'static str {
        "bootstrap"
    }

    fn evaluate(&self, before: &TimeSeries, after: &TimeSeries) -> Result<TestOutput> {
        let result = self.estimate(before, after)?;
        Ok(TestOutput {
            test: self.name().to_string(),
            intervals: result.intervals,
            distribution: Some(result.difference),
        })
    }
}
