//! Per-chokepoint transit delays.
//!
//! Delays arrive from an external service as hours per chokepoint name and
//! are converted into distance-equivalent cost at the configured ship speed:
//! `extra_km = hours * speed_kmh`.  Only positive, finite delays count.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use mt_graph::Edge;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelayPenalties {
    hours: FxHashMap<String, f64>,
}

impl DelayPenalties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay for `chokepoint`, replacing any previous value.
    pub fn set(&mut self, chokepoint: impl Into<String>, hours: f64) {
        self.hours.insert(chokepoint.into(), hours);
    }

    pub fn remove(&mut self, chokepoint: &str) -> Option<f64> {
        self.hours.remove(chokepoint)
    }

    /// Effective delay for `chokepoint`; `0.0` when absent or not positive.
    pub fn hours(&self, chokepoint: &str) -> f64 {
        match self.hours.get(chokepoint) {
            Some(&h) if h.is_finite() && h > 0.0 => h,
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Names with an entry, whether or not the delay is effective.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hours.keys().map(String::as_str)
    }

    /// Extra cost in km for traversing `edge` at `speed_kmh`.
    ///
    /// A lane passing several delayed chokepoints accumulates all of them.
    pub fn penalty_km(&self, edge: &Edge, speed_kmh: f64) -> f64 {
        if self.hours.is_empty() {
            return 0.0;
        }
        edge.chokepoints
            .iter()
            .map(|c| self.hours(c) * speed_kmh)
            .sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for DelayPenalties {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            hours: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
