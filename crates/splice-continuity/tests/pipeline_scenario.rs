//! End-to-end runs over synthetic ten-year station records

mod common;

use approx::assert_relative_eq;
use common::{cyclic_series, init_tracing, station, CYCLE_DAYS};
use splice_confidence::Statistic;
use splice_continuity::{BatchRunner, ContinuityConfig, PairStatus, TestKind};
#[cfg(feature = "parallel")]
use splice_core::ExecutionEngine;
use splice_core::{
    pairs_from_rows, SpliceGroupRow, SplicePair, StationSeriesSet, DAYS_PER_PERIOD,
};

const TEN_YEARS: usize = 10 * 365;
const FIELD: &str = "temp_f_mean";

/// Station A covers years 0-10, station B years 8-18
fn scenario(shift: f64) -> StationSeriesSet {
    [
        cyclic_series(station("725300"), 0, TEN_YEARS, 50.0),
        cyclic_series(station("725305"), 8 * DAYS_PER_PERIOD, TEN_YEARS, 50.0 + shift),
    ]
    .into_iter()
    .collect()
}

fn pair() -> SplicePair {
    SplicePair::new(1, station("725300"), station("725305"))
}

fn config() -> ContinuityConfig {
    ContinuityConfig {
        window_years: 3,
        n_samples: 1000,
        quantiles: vec![0.05, 0.95],
        seed: Some(20240611),
        tests: vec![TestKind::Bootstrap, TestKind::Asymptotic],
        ..Default::default()
    }
}

#[test]
fn test_equal_levels_interval_contains_zero() {
    init_tracing();
    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&[pair()], &scenario(0.0)).unwrap();

    let outcome = &report.outcomes[0];
    assert!(outcome.is_evaluated());
    assert_eq!(outcome.early, Some(station("725300")));
    assert_eq!(outcome.periods, Some((3, 3)));

    let interval = outcome
        .output("bootstrap")
        .and_then(|o| o.interval(FIELD, Statistic::Mean))
        .unwrap();
    assert!(interval.contains(0.0), "{interval}");
}

#[test]
fn test_shifted_level_interval_above_zero() {
    init_tracing();
    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&[pair()], &scenario(10.0)).unwrap();

    let outcome = &report.outcomes[0];
    let bootstrap = outcome
        .output("bootstrap")
        .and_then(|o| o.interval(FIELD, Statistic::Mean))
        .unwrap();
    assert!(bootstrap.lower() > 0.0, "{bootstrap}");
    assert!(bootstrap.contains(10.0), "{bootstrap}");

    let analytic = outcome
        .output("asymptotic")
        .and_then(|o| o.interval(FIELD, Statistic::Mean))
        .unwrap();
    assert!(analytic.lower() > 0.0, "{analytic}");
}

#[test]
fn test_boundary_is_early_series_end() {
    let source = scenario(0.0);
    let runner = BatchRunner::new(config()).unwrap();
    // late-first input order must not change the labelling
    let reversed = SplicePair::new(1, station("725305"), station("725300"));
    let report = runner.run(&[reversed], &source).unwrap();

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.early, Some(station("725300")));
    let expected = common::base() + chrono::Duration::days(TEN_YEARS as i64 - 1);
    assert_eq!(outcome.boundary, Some(expected));
}

#[test]
fn test_seeded_runs_are_identical() {
    let source = scenario(0.0);
    let runner = BatchRunner::new(config()).unwrap();
    let a = runner.run(&[pair()], &source).unwrap();
    let b = runner.run(&[pair()], &source).unwrap();
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn test_distribution_is_kept() {
    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&[pair()], &scenario(0.0)).unwrap();
    let output = report.outcomes[0].output("bootstrap").unwrap();
    let distribution = output.distribution.as_ref().unwrap();
    assert_eq!(distribution.len(), 1000);
    assert_eq!(distribution.keys().len(), 2);

    // same bucket means either side, so differences centre on zero
    let key = &distribution.keys()[0];
    let column = distribution.column(key).unwrap();
    let centre = column.iter().sum::<f64>() / column.len() as f64;
    assert_relative_eq!(centre, 0.0, epsilon = 0.1);
}

#[test]
fn test_rows_cover_every_test_and_bound() {
    let runner = BatchRunner::new(config()).unwrap();
    let report = runner.run(&[pair()], &scenario(0.0)).unwrap();
    let rows = report.rows();
    // bootstrap: mean and std, asymptotic: mean; two bounds each
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.pair == pair().label() && r.field == FIELD));
}

#[test]
fn test_chain_with_unreachable_station_is_flagged() {
    init_tracing();
    let rows = vec![
        SpliceGroupRow::new(4, station("725300")),
        SpliceGroupRow::new(4, station("725305")),
        SpliceGroupRow::new(4, station("725309")),
    ];
    let pairs = pairs_from_rows(&rows).unwrap();
    let mut source = scenario(0.0);
    // ends long before 725305 starts, so no earlier match exists
    source
        .insert(cyclic_series(station("725309"), -(CYCLE_DAYS as i64) * 4, 400, 50.0))
        .unwrap();

    let config = ContinuityConfig {
        match_policy: splice_core::MatchPolicy::Previous,
        ..config()
    };
    let report = BatchRunner::new(config).unwrap().run(&pairs, &source).unwrap();

    assert_eq!(report.len(), 2);
    assert!(report.outcomes[0].is_evaluated());
    assert!(matches!(
        report.outcomes[1].status,
        PairStatus::Failed { .. }
    ));
    assert_eq!(report.failed().count(), 1);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_engine_matches_sequential() {
    let source = scenario(0.0);
    let pairs = vec![pair(), SplicePair::new(1, station("725305"), station("725300"))];
    let sequential = BatchRunner::new(config()).unwrap().run(&pairs, &source).unwrap();
    let runner = BatchRunner::parallel(config(), Some(2)).unwrap();
    assert_eq!(runner.engine().num_threads(), 2);
    let parallel = runner.run(&pairs, &source).unwrap();
    assert_eq!(sequential.to_json().unwrap(), parallel.to_json().unwrap());
}
