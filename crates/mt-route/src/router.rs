//! Routing trait and default A* implementation.
//!
//! # Cost model
//!
//! The search minimises kilometres: a lane costs its sea distance plus the
//! delay penalty of every chokepoint it passes, converted at the router's
//! ship speed.  Lanes through a blockaded chokepoint are skipped entirely.
//!
//! # Heuristic
//!
//! Straight-line (haversine) distance to the destination node, reduced by
//! the largest shortcut any dateline bridge offers, since a bridge costs far
//! less than the great-circle gap it spans.  Stale heap entries are skipped
//! by comparing against the best known cost, so a node settled early can
//! still be improved and re-expanded.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use mt_core::{EdgeId, NodeId, PortId, TwinConfig};
use mt_graph::{Blockades, Edge, GraphIndex};

use crate::{DelayPenalties, RouteNotFound, RouteResult, stitch, unwrap_antimeridian};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable port-to-port routing engine.
///
/// Implementations take the blockade and penalty state as arguments and
/// hold no per-request state, so one router can serve many threads.
pub trait Router: Send + Sync {
    /// Cheapest open route between the ports with ids `origin` and
    /// `destination`.
    fn find_path(
        &self,
        graph: &GraphIndex,
        origin: &str,
        destination: &str,
        blockades: &Blockades,
        penalties: &DelayPenalties,
    ) -> Result<RouteResult, RouteNotFound>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct AStarRouter {
    /// Converts delay hours into km of cost.
    pub speed_kmh: f64,
    /// Passed through to [`stitch`].
    pub stitch_epsilon_m: f64,
}

impl Default for AStarRouter {
    fn default() -> Self {
        Self::from_config(&TwinConfig::default())
    }
}

impl AStarRouter {
    pub fn from_config(config: &TwinConfig) -> Self {
        Self {
            speed_kmh:        config.ship_speed_kmh,
            stitch_epsilon_m: config.stitch_epsilon_m,
        }
    }

    fn resolve_port(
        graph: &GraphIndex,
        id: &str,
    ) -> Result<(PortId, NodeId), RouteNotFound> {
        let port = graph
            .port_id(id)
            .ok_or_else(|| RouteNotFound::UnknownPort(id.to_string()))?;
        let node = graph.port(port).node;
        if node.index() >= graph.node_count() {
            return Err(RouteNotFound::UnknownPort(id.to_string()));
        }
        Ok((port, node))
    }
}

impl Router for AStarRouter {
    fn find_path(
        &self,
        graph: &GraphIndex,
        origin: &str,
        destination: &str,
        blockades: &Blockades,
        penalties: &DelayPenalties,
    ) -> Result<RouteResult, RouteNotFound> {
        let (origin_port, from) = Self::resolve_port(graph, origin)?;
        let (dest_port, to) = Self::resolve_port(graph, destination)?;
        if blockades.is_port_blocked(origin) {
            return Err(RouteNotFound::OriginBlocked(origin.to_string()));
        }
        if blockades.is_port_blocked(destination) {
            return Err(RouteNotFound::DestinationBlocked(destination.to_string()));
        }

        for name in penalties.names() {
            if graph.chokepoint(name).is_none() {
                warn!(chokepoint = name, "delay penalty for a chokepoint not in the catalog");
            }
        }

        let search = a_star(graph, from, to, blockades, penalties, self.speed_kmh).ok_or_else(
            || RouteNotFound::Unreachable {
                from: origin.to_string(),
                to:   destination.to_string(),
            },
        )?;
        debug!(
            origin,
            destination,
            lanes = search.edges.len(),
            expanded = search.expanded,
            cost_km = search.cost_km,
            "route solved"
        );

        Ok(self.assemble(graph, origin_port, dest_port, from, search))
    }
}

impl AStarRouter {
    fn assemble(
        &self,
        graph: &GraphIndex,
        origin: PortId,
        destination: PortId,
        from: NodeId,
        search: Search,
    ) -> RouteResult {
        let lanes: Vec<&Edge> = search.edges.iter().map(|&e| graph.edge(e)).collect();

        let mut chokepoints: Vec<String> = Vec::new();
        for c in lanes.iter().flat_map(|e| &e.chokepoints) {
            if !chokepoints.contains(c) {
                chokepoints.push(c.clone());
            }
        }

        let anchor = graph.node(from).pos;
        let (segments, full_geometry) = if lanes.is_empty() {
            (Vec::new(), vec![anchor])
        } else {
            let stitched = stitch(&lanes, anchor, self.stitch_epsilon_m);
            let full = unwrap_antimeridian(&stitched.merged);
            (stitched.segments, full)
        };

        RouteResult {
            origin,
            destination,
            lane_ids: lanes.iter().map(|e| e.lane_id.clone()).collect(),
            chokepoints,
            total_distance_km: lanes.iter().map(|e| e.distance_km).sum(),
            weighted_cost_km: search.cost_km,
            node_ids: search.nodes,
            edges: search.edges,
            segments,
            full_geometry,
        }
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

struct Search {
    nodes:    Vec<NodeId>,
    edges:    Vec<EdgeId>,
    cost_km:  f64,
    expanded: usize,
}

fn a_star(
    graph: &GraphIndex,
    from: NodeId,
    to: NodeId,
    blockades: &Blockades,
    penalties: &DelayPenalties,
    speed_kmh: f64,
) -> Option<Search> {
    if from == to {
        return Some(Search { nodes: vec![from], edges: vec![], cost_km: 0.0, expanded: 0 });
    }

    let n = graph.node_count();
    let goal = graph.node(to).pos;
    let slack = graph.max_bridge_shortcut_km();
    let h = |node: NodeId| (graph.node(node).pos.distance_km(goal) - slack).max(0.0);

    let mut best = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    best[from.index()] = 0.0;

    // Keyed on (f, g, node); the trailing NodeId makes tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, OrderedFloat<f64>, NodeId)>> =
        BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(h(from)), OrderedFloat(0.0), from)));
    let mut expanded = 0;

    while let Some(Reverse((_, OrderedFloat(cost), node))) = heap.pop() {
        if cost > best[node.index()] {
            continue;
        }
        if node == to {
            let (nodes, edges) = reconstruct(graph, &prev_edge, from, to)?;
            return Some(Search { nodes, edges, cost_km: cost, expanded });
        }
        expanded += 1;

        for (edge_id, next) in graph.neighbours(node) {
            let edge = graph.edge(edge_id);
            if blockades.is_edge_disabled(edge) {
                continue;
            }
            let new_cost = cost + edge.distance_km + penalties.penalty_km(edge, speed_kmh);
            if new_cost < best[next.index()] {
                best[next.index()] = new_cost;
                prev_edge[next.index()] = edge_id;
                heap.push(Reverse((OrderedFloat(new_cost + h(next)), OrderedFloat(new_cost), next)));
            }
        }
    }

    None
}

/// Walk `prev_edge` back from `to`.  Returns `None` if the chain does not
/// lead back to `from`.
fn reconstruct(
    graph: &GraphIndex,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
) -> Option<(Vec<NodeId>, Vec<EdgeId>)> {
    let mut nodes = vec![to];
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        if edges.len() >= prev_edge.len() {
            return None;
        }
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            return None;
        }
        edges.push(e);
        cur = graph.edge(e).other(cur);
        nodes.push(cur);
    }
    nodes.reverse();
    edges.reverse();
    Some((nodes, edges))
}
