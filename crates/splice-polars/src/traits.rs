//! Extension traits between Polars tables and splice structures

use polars::prelude::*;
use splice_core::{SpliceGroup, SplicePair, StationSeriesSet};

use crate::{GroupColumns, ObservationColumns, Result};

/// Read splice inputs out of a DataFrame
pub trait SpliceFrameExt {
    /// Build splice groups from a reference table
    ///
    /// Groups come out in ascending group id; stations within a group keep
    /// row order.
    fn splice_groups(&self, columns: &GroupColumns) -> Result<Vec<SpliceGroup>>;

    /// Build the consecutive splice pairs of every group in the table
    fn splice_pairs(&self, columns: &GroupColumns) -> Result<Vec<SplicePair>> {
        Ok(splice_core::expand_pairs(&self.splice_groups(columns)?))
    }

    /// Split a daily observation table into one series per station
    ///
    /// Rows of each station are ordered by date. Null measurements become
    /// NaN; null keys or dates are rejected.
    fn station_series(&self, columns: &ObservationColumns) -> Result<StationSeriesSet>;
}

/// Write batch results as DataFrames
pub trait ReportFrameExt {
    /// One row per interval bound
    ///
    /// Columns: `pair`, `test`, `field`, `statistic`, `quantile`, `value`.
    fn result_frame(&self) -> Result<DataFrame>;

    /// One row per pair with its status, boundary and early station
    fn outcome_frame(&self) -> Result<DataFrame>;

    /// Long-format bootstrap difference distributions
    ///
    /// Columns: `pair`, `test`, `draw`, `field`, `statistic`, `value`.
    fn distribution_frame(&self) -> Result<DataFrame>;
}
