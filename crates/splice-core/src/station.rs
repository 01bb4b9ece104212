//! Station identities, splice groups and pair expansion
//!
//! A splice group is an ordered chain of stations believed to be one
//! physical record. Pairs are always consecutive links of that chain:
//! `A -> B -> C` yields `(A, B)` and `(B, C)`, never `(A, C)`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity of one station, keyed by its primary and secondary ids
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId {
    /// Primary identifier (e.g. USAF)
    pub primary: String,
    /// Secondary identifier (e.g. WBAN)
    pub secondary: String,
}

impl StationId {
    /// Create a new station identity
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.primary, self.secondary)
    }
}

/// One row of the splice group reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpliceGroupRow {
    pub group_id: u32,
    pub station: StationId,
}

impl SpliceGroupRow {
    pub fn new(group_id: u32, station: StationId) -> Self {
        Self { group_id, station }
    }
}

/// A named chain of two or more stations, in succession order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpliceGroup {
    group_id: u32,
    stations: Vec<StationId>,
}

impl SpliceGroup {
    /// Create a group, rejecting chains with fewer than two stations
    pub fn new(group_id: u32, stations: Vec<StationId>) -> Result<Self> {
        if stations.len() < 2 {
            return Err(Error::ContractViolation(format!(
                "Splice group {group_id} has {} station(s); at least 2 are required",
                stations.len()
            )));
        }
        Ok(Self { group_id, stations })
    }

    pub fn group_id(&self) -> u32 {
        self.group_id
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Consecutive pairs of this group, in chain order
    pub fn pairs(&self) -> Vec<SplicePair> {
        self.stations
            .windows(2)
            .map(|w| SplicePair::new(self.group_id, w[0].clone(), w[1].clone()))
            .collect()
    }
}

/// Exactly two stations drawn from a splice group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplicePair {
    pub group_id: u32,
    pub first: StationId,
    pub second: StationId,
}

impl SplicePair {
    pub fn new(group_id: u32, first: StationId, second: StationId) -> Self {
        Self {
            group_id,
            first,
            second,
        }
    }

    /// Label used as the pair key in result tables
    pub fn label(&self) -> String {
        format!("{}:{}/{}", self.group_id, self.first, self.second)
    }
}

impl fmt::Display for SplicePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Group table rows by group id
///
/// Groups come back in ascending id order. Rows within a group keep the
/// order of the source table, which encodes succession and is never
/// re-sorted.
pub fn groups_from_rows(rows: &[SpliceGroupRow]) -> Result<Vec<SpliceGroup>> {
    let mut by_id: BTreeMap<u32, Vec<StationId>> = BTreeMap::new();
    for row in rows {
        by_id
            .entry(row.group_id)
            .or_default()
            .push(row.station.clone());
    }
    by_id
        .into_iter()
        .map(|(id, stations)| SpliceGroup::new(id, stations))
        .collect()
}

/// Expand every group into its consecutive pairs
pub fn expand_pairs(groups: &[SpliceGroup]) -> Vec<SplicePair> {
    groups.iter().flat_map(SpliceGroup::pairs).collect()
}

/// Group the table and expand it into pairs in one step
pub fn pairs_from_rows(rows: &[SpliceGroupRow]) -> Result<Vec<SplicePair>> {
    let groups = groups_from_rows(rows)?;
    let pairs = expand_pairs(&groups);
    tracing::debug!(groups = groups.len(), pairs = pairs.len(), "expanded splice groups");
    Ok(pairs)
}
