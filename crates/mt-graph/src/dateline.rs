//! Synthetic lanes joining nodes on opposite sides of the ±180° meridian.
//!
//! Lane data is cut at the antimeridian, so without help the Pacific is a
//! wall: a node at lon −179.9 and one at lon 179.9 are ~20 km apart but have
//! no lane between them.  [`dateline_bridges`] pairs them up with near-zero
//! cost lanes so the router never has to special-case the crossing.

use tracing::debug;

use mt_core::{DatelineConfig, NodeId};

use crate::network::{Edge, LaneKind, Node};

/// Lane-id prefix of every synthetic bridge.
pub const BRIDGE_LANE_PREFIX: &str = "DATELINE_BRIDGE_";

/// Compute the bridge lanes for `nodes`.
///
/// West-side candidates have `lon <= -edge_lon`, east-side candidates
/// `lon >= edge_lon`.  Each west node is matched to the east node that
/// minimises `sqrt(dLat² + dLonWrapped²)` with `dLonWrapped = 360 − (eastLon
/// − westLon)`, among those within `max_lat_delta_deg` of latitude.  A match
/// closer than `max_match_deg` yields one undirected lane (traversable both
/// ways) of cost `bridge_cost_km`, geometry `[west, east]`, no chokepoints,
/// and lane id `DATELINE_BRIDGE_<west>_<east>`.
///
/// Pure: the caller decides where the lanes go.  Returns an empty `Vec` when
/// either side has no candidates.
pub fn dateline_bridges(nodes: &[Node], cfg: &DatelineConfig) -> Vec<Edge> {
    let (mut west, mut east) = (Vec::new(), Vec::new());
    for (i, n) in nodes.iter().enumerate() {
        if n.pos.lon <= -cfg.edge_lon {
            west.push(NodeId::from_index(i));
        } else if n.pos.lon >= cfg.edge_lon {
            east.push(NodeId::from_index(i));
        }
    }
    if west.is_empty() || east.is_empty() {
        return Vec::new();
    }

    let mut bridges = Vec::new();
    for &w in &west {
        let wp = nodes[w.index()].pos;

        let mut best: Option<(NodeId, f64)> = None;
        for &e in &east {
            let ep = nodes[e.index()].pos;
            let d_lat = (wp.lat - ep.lat).abs();
            if d_lat > cfg.max_lat_delta_deg {
                continue;
            }
            let d_lon = 360.0 - (ep.lon - wp.lon);
            let d = (d_lat * d_lat + d_lon * d_lon).sqrt();
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((e, d));
            }
        }

        let Some((e, d)) = best else { continue };
        if d >= cfg.max_match_deg {
            continue;
        }

        let (wn, en) = (&nodes[w.index()], &nodes[e.index()]);
        debug!(west = %wn.key, east = %en.key, separation_deg = d, "bridging antimeridian");
        bridges.push(Edge {
            source: w,
            target: e,
            distance_km: cfg.bridge_cost_km,
            geometry: vec![wn.pos, en.pos],
            chokepoints: Vec::new(),
            lane_id: format!("{BRIDGE_LANE_PREFIX}{}_{}", wn.key, en.key),
            kind: LaneKind::DatelineBridge,
        });
    }
    bridges
}
