//! Polars integration for station splice continuity analysis
//!
//! Reads the splice group reference table and the daily observation table
//! out of Polars DataFrames, and writes batch results back as DataFrames.
//! Loading those tables from disk stays with the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use splice_continuity::{BatchRunner, ContinuityConfig};
//! use splice_polars::{GroupColumns, ObservationColumns, ReportFrameExt, SpliceFrameExt};
//!
//! let pairs = groups_df.splice_pairs(&GroupColumns::default())?;
//! let series = daily_df.station_series(&ObservationColumns::default())?;
//! let report = BatchRunner::new(ContinuityConfig::default())?.run(&pairs, &series)?;
//! let results = report.result_frame()?;
//! ```

mod config;
mod error;
mod read;
mod traits;
mod write;

pub use config::{GroupColumns, ObservationColumns};
pub use error::{Error, Result};
pub use traits::{ReportFrameExt, SpliceFrameExt};
