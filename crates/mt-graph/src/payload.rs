//! Raw graph payload as produced by the lane-network build pipeline.
//!
//! ```text
//! {
//!   "nodes":       { "<id>":   { "lat", "lon" } },
//!   "edges":       [ { "source", "target", "dist_km", "geometry": [[lon, lat], ...],
//!                      "chokepoints": [name, ...], "lane_id" } ],
//!   "ports":       { "<id>":   { "id"?, "name", "country"?, "lat", "lon",
//!                                "node_id", "dist_to_node"? } },
//!   "chokepoints": { "<name>": { "name"?, "lat", "lon" } }
//! }
//! ```
//!
//! Only `nodes` is mandatory.  Maps are `BTreeMap`s so ids are handed out in
//! key order and two loads of the same payload build identical indices.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GraphPayload {
    pub nodes: BTreeMap<String, RawNode>,

    #[serde(default)]
    pub edges: Vec<RawEdge>,

    #[serde(default)]
    pub ports: BTreeMap<String, RawPort>,

    #[serde(default)]
    pub chokepoints: BTreeMap<String, RawChokepoint>,
}

/// A mesh node.  The map key is its id; an `id` field, if present, is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    pub dist_km: f64,
    #[serde(default)]
    pub geometry: Vec<[f64; 2]>,
    #[serde(default)]
    pub chokepoints: Vec<String>,
    #[serde(default)]
    pub lane_id: Option<String>,
}

/// A port.  `id` falls back to the map key when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPort {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub node_id: String,
    #[serde(default)]
    pub dist_to_node: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawChokepoint {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl GraphPayload {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}
