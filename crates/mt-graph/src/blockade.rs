//! Simulated closures of ports and chokepoints.
//!
//! `Blockades` is a plain value the host owns and passes to every routing
//! request, so a solve always sees one consistent set of closures.  Ids are
//! not validated against any graph: toggling an unknown port or chokepoint
//! is accepted and simply never matches.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::network::Edge;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockades {
    #[serde(default)]
    ports: BTreeSet<String>,
    #[serde(default)]
    chokepoints: BTreeSet<String>,
}

impl Blockades {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the closure of port `id`.  Returns `true` if it is now blocked.
    pub fn toggle_port(&mut self, id: &str) -> bool {
        toggle(&mut self.ports, id)
    }

    /// Flip the closure of chokepoint `name`.  Returns `true` if it is now
    /// blocked.
    pub fn toggle_chokepoint(&mut self, name: &str) -> bool {
        toggle(&mut self.chokepoints, name)
    }

    pub fn block_port(&mut self, id: &str) {
        self.ports.insert(id.to_string());
    }

    pub fn block_chokepoint(&mut self, name: &str) {
        self.chokepoints.insert(name.to_string());
    }

    /// Lift every closure.
    pub fn reset(&mut self) {
        self.ports.clear();
        self.chokepoints.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.chokepoints.is_empty()
    }

    pub fn is_port_blocked(&self, id: &str) -> bool {
        self.ports.contains(id)
    }

    pub fn is_chokepoint_blocked(&self, name: &str) -> bool {
        self.chokepoints.contains(name)
    }

    /// `true` iff the lane passes through any closed chokepoint.
    ///
    /// Port closures never disable lanes: a closed port only stops being a
    /// valid origin or destination, and its node can still be transited.
    pub fn is_edge_disabled(&self, edge: &Edge) -> bool {
        !self.chokepoints.is_empty()
            && edge.chokepoints.iter().any(|c| self.chokepoints.contains(c))
    }

    pub fn blocked_ports(&self) -> impl Iterator<Item = &str> {
        self.ports.iter().map(String::as_str)
    }

    pub fn blocked_chokepoints(&self) -> impl Iterator<Item = &str> {
        self.chokepoints.iter().map(String::as_str)
    }
}

fn toggle(set: &mut BTreeSet<String>, key: &str) -> bool {
    if set.remove(key) {
        false
    } else {
        set.insert(key.to_string());
        true
    }
}
