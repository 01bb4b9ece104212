//! Configuration for continuity runs
//!
//! Resolved once at the process boundary (typically from JSON) and passed
//! explicitly into the runner; nothing below this layer reads files or
//! environment.

use serde::{Deserialize, Serialize};
use splice_confidence::{
    AsymptoticMeanShift, BootstrapEstimator, ContinuityTest, DEFAULT_QUANTILES, DEFAULT_RESAMPLES,
};
use splice_core::{moments, Error, MatchPolicy, Result, SplicePair};

/// Default window length on each side of the boundary, in years
pub const DEFAULT_WINDOW_YEARS: u32 = 3;

/// Longest accepted window, in years
pub const MAX_WINDOW_YEARS: u32 = 200;

/// Statistical tests that can be enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Paired-draw bootstrap of mean and std differences
    Bootstrap,
    /// Normal approximation for the mean shift
    Asymptotic,
}

impl TestKind {
    /// Name the built test reports in its output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Asymptotic => "asymptotic",
        }
    }
}

/// Parameters of a continuity run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContinuityConfig {
    pub window_years: u32,
    pub match_policy: MatchPolicy,
    pub n_samples: usize,
    pub quantiles: Vec<f64>,
    pub seed: Option<u64>,
    pub tests: Vec<TestKind>,
}

impl Default for ContinuityConfig {
    fn default() -> Self {
        Self {
            window_years: DEFAULT_WINDOW_YEARS,
            match_policy: MatchPolicy::default(),
            n_samples: DEFAULT_RESAMPLES,
            quantiles: DEFAULT_QUANTILES.to_vec(),
            seed: None,
            tests: vec![TestKind::Bootstrap],
        }
    }
}

impl ContinuityConfig {
    /// Parse and validate a JSON document; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("Invalid continuity config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Computation(format!("Failed to serialize config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_years == 0 || self.window_years > MAX_WINDOW_YEARS {
            return Err(Error::InvalidParameter(format!(
                "window_years must be between 1 and {MAX_WINDOW_YEARS}, got {}",
                self.window_years
            )));
        }
        if self.n_samples == 0 {
            return Err(Error::InvalidParameter(
                "n_samples must be at least 1".to_string(),
            ));
        }
        if self.quantiles.is_empty() {
            return Err(Error::InvalidParameter(
                "quantiles must not be empty".to_string(),
            ));
        }
        for &q in &self.quantiles {
            moments::validate_probability(q)?;
        }
        if self.tests.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one test must be enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Seed for one pair's tests, derived from the run seed and the pair label
    ///
    /// Depends only on the run seed and the pair label, not on the rest of
    /// the batch.
    pub fn pair_seed(&self, pair: &SplicePair) -> Option<u64> {
        self.seed.map(|seed| {
            // FNV-1a over the label, starting from the run seed
            pair.label()
                .bytes()
                .fold(seed ^ 0xcbf2_9ce4_8422_2325, |h, b| {
                    (h ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
                })
        })
    }

    /// Instantiate the enabled tests in configured order with the run seed
    pub fn build_tests(&self) -> Result<Vec<Box<dyn ContinuityTest>>> {
        self.build_tests_seeded(self.seed)
    }

    /// Instantiate the enabled tests with an explicit bootstrap seed
    pub fn build_tests_seeded(&self, seed: Option<u64>) -> Result<Vec<Box<dyn ContinuityTest>>> {
        self.tests
            .iter()
            .map(|kind| -> Result<Box<dyn ContinuityTest>> {
                Ok(match kind {
                    TestKind::Bootstrap => {
                        let mut est = BootstrapEstimator::new(self.n_samples, &self.quantiles)?;
                        if let Some(seed) = seed {
                            est = est.with_seed(seed);
                        }
                        Box::new(est)
                    }
                    TestKind::Asymptotic => Box::new(AsymptoticMeanShift::new(&self.quantiles)?),
                })
            })
            .collect()
    }
}
