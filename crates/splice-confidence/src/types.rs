//! Common types for continuity intervals

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-field statistic whose difference across the boundary is tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mean,
    Std,
}

impl Statistic {
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Std => "std",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (field, statistic) column of a difference distribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatisticKey {
    pub field: String,
    pub statistic: Statistic,
}

impl StatisticKey {
    pub fn new(field: impl Into<String>, statistic: Statistic) -> Self {
        Self {
            field: field.into(),
            statistic,
        }
    }
}

impl fmt::Display for StatisticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field, self.statistic)
    }
}

/// Quantile bounds on the after-minus-before difference of one statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalEstimate {
    pub key: StatisticKey,
    /// Requested probabilities, in request order
    pub quantiles: Vec<f64>,
    /// Difference value at each requested probability; NaN when degenerate
    pub bounds: Vec<f64>,
}

impl IntervalEstimate {
    pub fn new(key: StatisticKey, quantiles: Vec<f64>, bounds: Vec<f64>) -> Self {
        Self {
            key,
            quantiles,
            bounds,
        }
    }

    /// Bound at the smallest requested probability
    pub fn lower(&self) -> f64 {
        self.extreme(|a, b| a < b)
    }

    /// Bound at the largest requested probability
    pub fn upper(&self) -> f64 {
        self.extreme(|a, b| a > b)
    }

    fn extreme(&self, better: impl Fn(f64, f64) -> bool) -> f64 {
        let mut best: Option<(f64, f64)> = None;
        for (&q, &v) in self.quantiles.iter().zip(&self.bounds) {
            match best {
                Some((bq, _)) if !better(q, bq) => {}
                _ => best = Some((q, v)),
            }
        }
        best.map_or(f64::NAN, |(_, v)| v)
    }

    /// Width between the outermost bounds
    pub fn width(&self) -> f64 {
        self.upper() - self.lower()
    }

    /// Whether `value` lies within the outermost bounds
    ///
    /// Always false when either bound is NaN.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower() && value <= self.upper()
    }

    /// True when any bound could not be computed
    pub fn is_degenerate(&self) -> bool {
        self.bounds.iter().any(|b| b.is_nan())
    }
}

impl fmt::Display for IntervalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{:.4}, {:.4}]", self.key, self.lower(), self.upper())
    }
}

/// Per-draw differences of every statistic, one row per bootstrap draw
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BootstrapDistribution {
    keys: Vec<StatisticKey>,
    rows: Vec<Vec<f64>>,
}

impl BootstrapDistribution {
    pub fn new(keys: Vec<StatisticKey>, rows: Vec<Vec<f64>>) -> Self {
        Self { keys, rows }
    }

    pub fn keys(&self) -> &[StatisticKey] {
        &self.keys
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of draws
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All draws of one statistic
    pub fn column(&self, key: &StatisticKey) -> Option<Vec<f64>> {
        let i = self.keys.iter().position(|k| k == key)?;
        Some(self.rows.iter().map(|r| r[i]).collect())
    }
}

/// Output of one continuity test on one pair of windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutput {
    /// Name of the test that produced this output
    pub test: String,
    pub intervals: Vec<IntervalEstimate>,
    /// Raw difference distribution, for resampling tests
    pub distribution: Option<BootstrapDistribution>,
}

impl TestOutput {
    /// Interval for one field and statistic
    pub fn interval(&self, field: &str, statistic: Statistic) -> Option<&IntervalEstimate> {
        self.intervals
            .iter()
            .find(|i| i.key.field == field && i.key.statistic == statistic)
    }
}
