//! The seam between the orchestrator and individual statistical tests
//!
//! A continuity test takes the two resampled boundary windows (before and
//! after the splice) and reports intervals on the after-minus-before
//! difference. Tests are object safe so a configured list of them can be
//! run over every pair.

use crate::types::TestOutput;
use splice_core::{Result, TimeSeries};

/// A statistical comparison of the windows on either side of a splice
pub trait ContinuityTest: Send + Sync {
    /// Name recorded against every row this test produces
    fn name(&self) -> &'static str;

    /// Compare `before` (early series, last window) with `after` (late
    /// series, first window)
    fn evaluate(&self, before: &TimeSeries, after: &TimeSeries) -> Result<TestOutput>;
}

impl<T: ContinuityTest + ?Sized> ContinuityTest for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&self, before: &TimeSeries, after: &TimeSeries) -> Result<TestOutput> {
        (**self).evaluate(before, after)
    }
}

/// Both windows must carry the same fields in the same order
pub(crate) fn check_matching_fields(before: &TimeSeries, after: &TimeSeries) -> Result<()> {
    if before.fields() != after.fields() {
        return Err(splice_core::Error::ContractViolation(format!(
            "Window fields differ: {:?} vs {:?}",
            before.fields(),
            after.fields()
        )));
    }
    Ok(())
}
