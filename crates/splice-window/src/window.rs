//! Fixed-length windows at either end of a series
//!
//! A window of `Y` years covers `365 * Y` days inclusive, taken from the
//! start or the end of a series, and is then reduced to one mean value per
//! 365-day period. Periods count backward from the newest record in the
//! window, so when the last window of an early series is set against the
//! first window of a late series, matching periods sit at equal lags from
//! the splice boundary.

use crate::align::AlignedPair;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use splice_core::{moments, Error, Result, TimeSeries, DAYS_PER_PERIOD};
use std::fmt;
use tracing::{debug, instrument};

/// Which end of a series a window is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowEnd {
    /// Starts at the earliest record
    First,
    /// Ends at the latest record
    Last,
}

impl fmt::Display for WindowEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowEnd::First => write!(f, "first"),
            WindowEnd::Last => write!(f, "last"),
        }
    }
}

/// A window extracted from one series
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub end: WindowEnd,
    pub years: u32,
    /// Inclusive start of the window's date range
    pub start: NaiveDate,
    /// Inclusive end of the window's date range
    pub stop: NaiveDate,
    /// Daily records inside the range
    pub raw: TimeSeries,
    /// One mean row per 365-day period
    pub resampled: TimeSeries,
}

impl Window {
    /// Number of daily records the window was built from
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }
}

/// Inclusive date range of a `years`-long window at `end` of `series`
pub fn window_range(series: &TimeSeries, end: WindowEnd, years: u32) -> Result<(NaiveDate, NaiveDate)> {
    if years == 0 {
        return Err(Error::InvalidParameter(
            "Window length must be at least one year".to_string(),
        ));
    }
    let out_of_range = || {
        Error::InvalidParameter(format!(
            "Window of {years} years runs outside the supported date range"
        ))
    };
    let span = Duration::try_days(years as i64 * DAYS_PER_PERIOD - 1).ok_or_else(out_of_range)?;
    match end {
        WindowEnd::First => {
            let start = series.first_date().ok_or_else(|| Error::empty_input("window"))?;
            let stop = start.checked_add_signed(span).ok_or_else(out_of_range)?;
            Ok((start, stop))
        }
        WindowEnd::Last => {
            let stop = series.last_date().ok_or_else(|| Error::empty_input("window"))?;
            let start = stop.checked_sub_signed(span).ok_or_else(out_of_range)?;
            Ok((start, stop))
        }
    }
}

/// Extract a window and resample it to 365-day means
#[instrument(skip(series), fields(station = %series.station(), records = series.len()))]
pub fn extract_window(series: &TimeSeries, end: WindowEnd, years: u32) -> Result<Window> {
    let (start, stop) = window_range(series, end, years)?;
    let raw = series.slice_dates(start, stop);
    let resampled = raw.resample(DAYS_PER_PERIOD, moments::mean)?;

    debug!(%start, %stop, raw = raw.len(), periods = resampled.len(), "extracted window");

    Ok(Window {
        end,
        years,
        start,
        stop,
        raw,
        resampled,
    })
}

/// The two windows facing each other across a splice boundary
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryWindows {
    /// Last `years` of the early series
    pub before: Window,
    /// First `years` of the truncated late series
    pub after: Window,
}

impl BoundaryWindows {
    pub fn from_aligned(aligned: &AlignedPair<'_>, years: u32) -> Result<Self> {
        Ok(Self {
            before: extract_window(aligned.early, WindowEnd::Last, years)?,
            after: extract_window(&aligned.late, WindowEnd::First, years)?,
        })
    }
}
