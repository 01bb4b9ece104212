//! Batch evaluation over every splice pair

use crate::config::ContinuityConfig;
use crate::report::{BatchReport, PairOutcome, PairStatus};
use crate::suite::window_test;
use splice_core::{
    expand_pairs, Error, ExecutionEngine, Result, SeriesSource, SequentialEngine, SpliceGroup,
    SplicePair, StationId, TimeSeries,
};
use splice_window::SeriesAligner;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use splice_core::ParallelEngine;

/// Runs the configured tests over many pairs
///
/// Pairs are independent, so the per-pair loop goes through the execution
/// engine and results land in pair order regardless of engine. A pair that
/// cannot be aligned or is missing a series is kept in the report as
/// [`PairStatus::Failed`]; any other error aborts the batch.
pub struct BatchRunner<E: ExecutionEngine = SequentialEngine> {
    config: ContinuityConfig,
    aligner: SeriesAligner,
    engine: E,
}

impl BatchRunner<SequentialEngine> {
    pub fn new(config: ContinuityConfig) -> Result<Self> {
        Self::with_engine(config, SequentialEngine)
    }
}

#[cfg(feature = "parallel")]
impl BatchRunner<ParallelEngine> {
    /// Spread pairs over a rayon pool of `num_threads`, or the global pool
    pub fn parallel(config: ContinuityConfig, num_threads: Option<usize>) -> Result<Self> {
        let engine = match num_threads {
            Some(n) => ParallelEngine::with_num_threads(n)?,
            None => ParallelEngine::new(),
        };
        Self::with_engine(config, engine)
    }
}

impl<E: ExecutionEngine> BatchRunner<E> {
    pub fn with_engine(config: ContinuityConfig, engine: E) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            aligner: SeriesAligner::new(config.match_policy),
            config,
            engine,
        })
    }

    pub fn config(&self) -> &ContinuityConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Names of the tests each pair is run through
    pub fn test_names(&self) -> Vec<&'static str> {
        self.config.tests.iter().map(|t| t.name()).collect()
    }

    /// Align, window and test one pair
    pub fn evaluate_pair<S: SeriesSource + ?Sized>(
        &self,
        pair: &SplicePair,
        source: &S,
    ) -> Result<PairOutcome> {
        let first = lookup(source, &pair.first)?;
        let second = lookup(source, &pair.second)?;
        let tests = self.config.build_tests_seeded(self.config.pair_seed(pair))?;

        let result = window_test(
            first,
            second,
            self.config.window_years,
            &self.aligner,
            &tests,
        )?;

        Ok(PairOutcome {
            pair: pair.clone(),
            status: PairStatus::Evaluated,
            boundary: Some(result.boundary),
            early: Some(result.early),
            periods: Some(result.periods),
            outputs: result.outputs,
        })
    }

    /// Evaluate every pair, flagging pair-local failures
    #[instrument(skip_all, fields(
        pairs = pairs.len(),
        strategy = ?self.engine.strategy(),
        threads = self.engine.num_threads(),
    ))]
    pub fn run<S: SeriesSource + Sync + ?Sized>(
        &self,
        pairs: &[SplicePair],
        source: &S,
    ) -> Result<BatchReport> {
        let results = self
            .engine
            .execute_batch(pairs.len(), |i| self.evaluate_pair(&pairs[i], source));

        let mut outcomes = Vec::with_capacity(results.len());
        for (pair, result) in pairs.iter().zip(results) {
            match result {
                Ok(outcome) => {
                    debug!(pair = %pair, "evaluated");
                    outcomes.push(outcome);
                }
                Err(e) if e.is_pair_local() => {
                    warn!(pair = %pair, error = %e, "pair flagged");
                    outcomes.push(PairOutcome::failed(pair.clone(), &e));
                }
                Err(e) => return Err(e),
            }
        }

        let report = BatchReport::new(outcomes);
        info!(
            evaluated = report.evaluated().count(),
            failed = report.failed().count(),
            "batch complete"
        );
        Ok(report)
    }

    /// Expand groups into consecutive pairs and evaluate them
    pub fn run_groups<S: SeriesSource + Sync + ?Sized>(
        &self,
        groups: &[SpliceGroup],
        source: &S,
    ) -> Result<BatchReport> {
        self.run(&expand_pairs(groups), source)
    }
}

fn lookup<'s, S: SeriesSource + ?Sized>(source: &'s S, id: &StationId) -> Result<&'s TimeSeries> {
    source
        .series(id)
        .ok_or_else(|| Error::MissingSeries(id.clone()))
}
