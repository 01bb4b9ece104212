//! Daily station time series
//!
//! [`TimeSeries`] is the only storage abstraction the windowing and
//! alignment code depends on. It exposes three capabilities: slicing by an
//! inclusive date range, resampling into fixed-length periods anchored at
//! the most recent record, and nearest-date lookup under a [`MatchPolicy`].
//!
//! Storage is columnar: one date index plus one `f64` column per field,
//! with NaN marking a missing observation.

use crate::station::StationId;
use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How a boundary date is matched against another series' dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// First date on or after the boundary
    #[default]
    Next,
    /// Last date on or before the boundary
    Previous,
    /// Closest date; ties resolve to the earlier one
    Nearest,
}

impl MatchPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Nearest => "nearest",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "next" | "bfill" => Ok(Self::Next),
            "previous" | "ffill" => Ok(Self::Previous),
            "nearest" => Ok(Self::Nearest),
            other => Err(Error::InvalidParameter(format!(
                "Unknown match policy '{other}'"
            ))),
        }
    }
}

/// Aggregation applied to the values of one field within one period
pub type Aggregator = fn(&[f64]) -> f64;

/// Ordered daily observations for one station
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    station: StationId,
    fields: Vec<String>,
    dates: Vec<NaiveDate>,
    columns: Vec<Vec<f64>>,
}

impl TimeSeries {
    /// Create a series from a date index and one column per field
    ///
    /// Dates must be strictly increasing; every column must match the index
    /// length and field names must be unique.
    pub fn new(
        station: StationId,
        fields: Vec<String>,
        dates: Vec<NaiveDate>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if fields.len() != columns.len() {
            return Err(Error::size_mismatch(fields.len(), columns.len(), "field columns"));
        }
        for (i, name) in fields.iter().enumerate() {
            if fields[..i].contains(name) {
                return Err(Error::ContractViolation(format!(
                    "Duplicate field '{name}' in series for {station}"
                )));
            }
        }
        for (name, column) in fields.iter().zip(&columns) {
            if column.len() != dates.len() {
                return Err(Error::size_mismatch(
                    dates.len(),
                    column.len(),
                    &format!("field '{name}'"),
                ));
            }
        }
        if let Some(pos) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(Error::ContractViolation(format!(
                "Dates for {station} must be strictly increasing: {} is followed by {}",
                dates[pos],
                dates[pos + 1]
            )));
        }
        Ok(Self {
            station,
            fields,
            dates,
            columns,
        })
    }

    /// Create a series from row-oriented records
    pub fn from_rows<I>(station: StationId, fields: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Vec<f64>)>,
    {
        let mut dates = Vec::new();
        let mut columns = vec![Vec::new(); fields.len()];
        for (date, values) in rows {
            if values.len() != fields.len() {
                return Err(Error::size_mismatch(
                    fields.len(),
                    values.len(),
                    &format!("record at {date}"),
                ));
            }
            dates.push(date);
            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value);
            }
        }
        Self::new(station, fields, dates, columns)
    }

    pub fn station(&self) -> &StationId {
        &self.station
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Values of a named field
    pub fn column(&self, field: &str) -> Option<&[f64]> {
        self.fields
            .iter()
            .position(|f| f == field)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Values of every field at row `index`
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.len()).then(|| self.columns.iter().map(|c| c[index]).collect())
    }

    fn take_range(&self, range: std::ops::Range<usize>) -> Self {
        Self {
            station: self.station.clone(),
            fields: self.fields.clone(),
            dates: self.dates[range.clone()].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| c[range.clone()].to_vec())
                .collect(),
        }
    }

    /// Records with `start <= date <= end`
    pub fn slice_dates(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end).max(lo);
        self.take_range(lo..hi)
    }

    /// Records from row `index` onward
    pub fn slice_from(&self, index: usize) -> Self {
        self.take_range(index.min(self.len())..self.len())
    }

    /// Row index matching `date` under `policy`
    pub fn nearest_index(&self, date: NaiveDate, policy: MatchPolicy) -> Result<usize> {
        let after = self.dates.partition_point(|d| *d < date);
        let through = self.dates.partition_point(|d| *d <= date);
        let found = match policy {
            MatchPolicy::Next => (after < self.len()).then_some(after),
            MatchPolicy::Previous => through.checked_sub(1),
            MatchPolicy::Nearest => {
                let prev = through.checked_sub(1);
                let next = (after < self.len()).then_some(after);
                match (prev, next) {
                    (Some(p), Some(n)) => {
                        let dp = (date - self.dates[p]).num_days();
                        let dn = (self.dates[n] - date).num_days();
                        Some(if dn < dp { n } else { p })
                    }
                    (p, n) => p.or(n),
                }
            }
        };
        found.ok_or_else(|| Error::Alignment {
            boundary: date,
            policy: policy.to_string(),
        })
    }

    /// Aggregate into `period_days`-long periods anchored at the last record
    ///
    /// Periods are closed on the right and labelled by their right edge, so
    /// the newest period is `(last - period, last]` and earlier periods count
    /// backward from there. Periods between the first and last record that
    /// hold no records are emitted with every field NaN.
    pub fn resample(&self, period_days: i64, aggregate: Aggregator) -> Result<Self> {
        if period_days <= 0 {
            return Err(Error::InvalidParameter(format!(
                "Resample period must be positive, got {period_days} days"
            )));
        }
        let (Some(first), Some(last)) = (self.first_date(), self.last_date()) else {
            return Ok(self.take_range(0..0));
        };

        let periods_back = |d: NaiveDate| ((last - d).num_days() / period_days) as usize;
        let n_periods = periods_back(first) + 1;

        // bucket[j] holds row indices; j = 0 is the oldest period
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); n_periods];
        for (row, &date) in self.dates.iter().enumerate() {
            buckets[n_periods - 1 - periods_back(date)].push(row);
        }

        let dates = (0..n_periods)
            .map(|j| last - Duration::days((n_periods - 1 - j) as i64 * period_days))
            .collect();

        let mut scratch = Vec::new();
        let columns = self
            .columns
            .iter()
            .map(|column| {
                buckets
                    .iter()
                    .map(|rows| {
                        scratch.clear();
                        scratch.extend(rows.iter().map(|&r| column[r]));
                        if scratch.is_empty() {
                            f64::NAN
                        } else {
                            aggregate(&scratch)
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            station: self.station.clone(),
            fields: self.fields.clone(),
            dates,
            columns,
        })
    }
}

/// Lookup of the series recorded for a station
pub trait SeriesSource {
    fn series(&self, station: &StationId) -> Option<&TimeSeries>;
}

impl SeriesSource for HashMap<StationId, TimeSeries> {
    fn series(&self, station: &StationId) -> Option<&TimeSeries> {
        self.get(station)
    }
}

/// In-memory set of station series, one per station key
#[derive(Debug, Clone, Default)]
pub struct StationSeriesSet {
    series: HashMap<StationId, TimeSeries>,
}

impl StationSeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series, rejecting a second series for the same station
    pub fn insert(&mut self, series: TimeSeries) -> Result<()> {
        let key = series.station().clone();
        if self.series.contains_key(&key) {
            return Err(Error::ContractViolation(format!(
                "Duplicate series for station {key}"
            )));
        }
        self.series.insert(key, series);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn stations(&self) -> impl Iterator<Item = &StationId> {
        self.series.keys()
    }
}

impl SeriesSource for StationSeriesSet {
    fn series(&self, station: &StationId) -> Option<&TimeSeries> {
        self.series.get(station)
    }
}

impl FromIterator<TimeSeries> for StationSeriesSet {
    /// Later series replace earlier ones for the same station
    fn from_iter<I: IntoIterator<Item = TimeSeries>>(iter: I) -> Self {
        Self {
            series: iter
                .into_iter()
                .map(|s| (s.station().clone(), s))
                .collect(),
        }
    }
}
