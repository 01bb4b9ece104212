//! Running configured tests over the windows of one pair

use chrono::NaiveDate;
use splice_confidence::{ContinuityTest, TestOutput};
use splice_core::{Result, StationId, TimeSeries};
use splice_window::{BoundaryWindows, SeriesAligner};
use tracing::{debug, instrument};

/// Apply every test to the same pair of windows, in order
pub fn test_suite<T: ContinuityTest>(
    before: &TimeSeries,
    after: &TimeSeries,
    tests: &[T],
) -> Result<Vec<TestOutput>> {
    tests.iter().map(|t| t.evaluate(before, after)).collect()
}

/// Result of aligning, windowing and testing one pair of series
#[derive(Debug, Clone)]
pub struct WindowTestResult {
    pub boundary: NaiveDate,
    pub early: StationId,
    pub late: StationId,
    /// Annual periods in the before/after windows
    pub periods: (usize, usize),
    pub outputs: Vec<TestOutput>,
}

/// Align two series, take `years`-long windows either side of the
/// boundary and run `tests` on them
#[instrument(skip_all, fields(
    first = %first.station(),
    second = %second.station(),
    years = years,
    tests = tests.len(),
))]
pub fn window_test<T: ContinuityTest>(
    first: &TimeSeries,
    second: &TimeSeries,
    years: u32,
    aligner: &SeriesAligner,
    tests: &[T],
) -> Result<WindowTestResult> {
    let aligned = aligner.align(first, second)?;
    let windows = BoundaryWindows::from_aligned(&aligned, years)?;
    let before = &windows.before.resampled;
    let after = &windows.after.resampled;

    debug!(
        boundary = %aligned.boundary,
        before = before.len(),
        after = after.len(),
        "windows ready"
    );

    let outputs = test_suite(before, after, tests)?;
    Ok(WindowTestResult {
        boundary: aligned.boundary,
        early: aligned.early.station().clone(),
        late: aligned.late.station().clone(),
        periods: (before.len(), after.len()),
        outputs,
    })
}
