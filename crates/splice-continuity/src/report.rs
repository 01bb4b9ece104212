//! Per-pair outcomes and the concatenated result table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use splice_confidence::{Statistic, TestOutput};
use splice_core::{Error, Result, SplicePair, StationId};

/// Whether a pair produced test output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PairStatus {
    Evaluated,
    /// Pair could not be evaluated; kept in the report for review
    Failed { reason: String },
}

/// Everything recorded for one splice pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairOutcome {
    pub pair: SplicePair,
    pub status: PairStatus,
    /// Last date of the early series, when alignment got that far
    pub boundary: Option<NaiveDate>,
    /// Station whose record ends first
    pub early: Option<StationId>,
    /// Annual periods in the before/after windows
    pub periods: Option<(usize, usize)>,
    /// Test outputs in configured order
    pub outputs: Vec<TestOutput>,
}

impl PairOutcome {
    pub fn failed(pair: SplicePair, error: &Error) -> Self {
        Self {
            pair,
            status: PairStatus::Failed {
                reason: error.to_string(),
            },
            boundary: None,
            early: None,
            periods: None,
            outputs: Vec::new(),
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self.status, PairStatus::Evaluated)
    }

    /// Output of a named test
    pub fn output(&self, test: &str) -> Option<&TestOutput> {
        self.outputs.iter().find(|o| o.test == test)
    }

    /// Long-format rows for this pair
    pub fn rows(&self) -> Vec<ResultRow> {
        let label = self.pair.label();
        self.outputs
            .iter()
            .flat_map(|output| {
                output.intervals.iter().flat_map(|interval| {
                    interval
                        .quantiles
                        .iter()
                        .zip(&interval.bounds)
                        .map(|(&quantile, &value)| ResultRow {
                            pair: label.clone(),
                            test: output.test.clone(),
                            field: interval.key.field.clone(),
                            statistic: interval.key.statistic,
                            quantile,
                            value,
                        })
                })
            })
            .collect()
    }
}

/// One bound of one interval, keyed by pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub pair: String,
    pub test: String,
    pub field: String,
    pub statistic: Statistic,
    pub quantile: f64,
    pub value: f64,
}

/// Results across all pairs of a batch, in pair order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<PairOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<PairOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn evaluated(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| o.is_evaluated())
    }

    pub fn failed(&self) -> impl Iterator<Item = &PairOutcome> {
        self.outcomes.iter().filter(|o| !o.is_evaluated())
    }

    /// All pairs' rows concatenated
    pub fn rows(&self) -> Vec<ResultRow> {
        self.outcomes.iter().flat_map(PairOutcome::rows).collect()
    }

    pub fn outcome(&self, pair: &SplicePair) -> Option<&PairOutcome> {
        self.outcomes.iter().find(|o| &o.pair == pair)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Computation(format!("Failed to serialize report: {e}")))
    }
}
