//! Lane graph representation, builder, and payload loader.
//!
//! # Data layout
//!
//! Lanes are **undirected**: each [`Edge`] is stored once and referenced from
//! both endpoints.  Incident edges use a Compressed Sparse Row layout; given
//! a `NodeId n`, its lanes occupy
//!
//! ```text
//! adj_edges[ node_adj_start[n] .. node_adj_start[n+1] ]
//! ```
//!
//! so the router's inner loop is a contiguous scan.
//!
//! Dateline bridges are computed by [`GraphBuilder::build_with`] from the
//! complete node set and appended *before* the CSR arrays are laid out.
//! The finished [`GraphIndex`] is immutable; blockade state lives in
//! [`Blockades`](crate::Blockades), outside the index.
//!
//! # Spatial index
//!
//! R-trees (via `rstar`) over node and port positions answer nearest-node
//! and nearest-port queries for host click selection.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use mt_core::{DatelineConfig, EdgeId, GeoPoint, NodeId, PortId};

use crate::dateline::dateline_bridges;
use crate::payload::GraphPayload;
use crate::{GraphLoadError, GraphResult};

/// Ports snapped further than this from their node are logged at load.
const FAR_PORT_KM: f64 = 500.0;

// ── Entities ──────────────────────────────────────────────────────────────────

/// A point in the navigable mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Id from the payload.
    pub key: String,
    pub pos: GeoPoint,
}

/// Where a lane came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaneKind {
    /// Loaded from the payload.
    Lane,
    /// Synthetic antimeridian connector.
    DatelineBridge,
}

/// A navigable connection between two nodes.
///
/// Traversable in both directions at the same cost.  `geometry` is stored
/// in one fixed direction, which need not run `source → target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub distance_km: f64,
    pub geometry: Vec<GeoPoint>,
    pub chokepoints: Vec<String>,
    pub lane_id: String,
    pub kind: LaneKind,
}

impl Edge {
    /// The endpoint opposite `node`.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if node == self.source { self.target } else { self.source }
    }

    #[inline]
    pub fn is_bridge(&self) -> bool {
        self.kind == LaneKind::DatelineBridge
    }

    pub fn passes(&self, chokepoint: &str) -> bool {
        self.chokepoints.iter().any(|c| c == chokepoint)
    }
}

/// A named, user-selectable origin/destination anchored to one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub id: String,
    pub name: String,
    pub country: String,
    pub pos: GeoPoint,
    pub node: NodeId,
    pub distance_to_node: f64,
}

/// A named strait or canal.
#[derive(Debug, Clone, PartialEq)]
pub struct Chokepoint {
    pub name: String,
    pub pos: GeoPoint,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in a spatial index: a 2-D `[lat, lon]` point and its id.
#[derive(Clone)]
struct Located<T> {
    point: [f64; 2],
    id: T,
}

impl<T> RTreeObject for Located<T> {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl<T> PointDistance for Located<T> {
    /// Squared planar distance in degrees, matching the snapping done when
    /// the lane network was built.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── GraphIndex ────────────────────────────────────────────────────────────────

/// Nodes, lanes, ports, and chokepoints of the shipping network.
///
/// Build with [`GraphIndex::load`] (from a payload) or [`GraphBuilder`].
pub struct GraphIndex {
    nodes:       Vec<Node>,
    edges:       Vec<Edge>,
    ports:       Vec<Port>,
    chokepoints: Vec<Chokepoint>,

    /// CSR row pointer; length = `node_count + 1`.
    node_adj_start: Vec<u32>,
    /// Incident lanes, grouped by node.
    adj_edges: Vec<EdgeId>,

    node_by_key: FxHashMap<String, NodeId>,
    port_by_id:  FxHashMap<String, PortId>,

    bridge_count: usize,
    /// Largest amount by which a bridge undercuts the great-circle distance
    /// between its endpoints.
    max_bridge_shortcut_km: f64,

    node_idx: RTree<Located<NodeId>>,
    port_idx: RTree<Located<PortId>>,
}

impl GraphIndex {
    /// Load from an already-parsed payload with default dateline settings.
    pub fn load(payload: GraphPayload) -> GraphResult<Self> {
        Self::load_with(payload, &DatelineConfig::default())
    }

    /// Parse a JSON document and load it.
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        Self::load(GraphPayload::from_json_str(json)?)
    }

    /// Parse JSON from a reader and load it.
    pub fn from_reader<R: std::io::Read>(reader: R) -> GraphResult<Self> {
        Self::load(GraphPayload::from_reader(reader)?)
    }

    /// Read and load a payload file with default dateline settings.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> GraphResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Validate and index `payload`, adding dateline bridges per `dateline`.
    pub fn load_with(payload: GraphPayload, dateline: &DatelineConfig) -> GraphResult<Self> {
        if payload.nodes.len() >= u32::MAX as usize {
            return Err(GraphLoadError::TooLarge("nodes"));
        }
        if payload.edges.len() >= (u32::MAX / 2) as usize {
            return Err(GraphLoadError::TooLarge("edges"));
        }

        let mut b = GraphBuilder::with_capacity(payload.nodes.len(), payload.edges.len());

        for (key, raw) in payload.nodes {
            let pos = GeoPoint::new(raw.lat, raw.lon);
            check_coord(|| format!("node {key}"), pos)?;
            b.add_node(key, pos);
        }

        for (i, raw) in payload.edges.into_iter().enumerate() {
            let lane_id = raw.lane_id.unwrap_or_else(|| i.to_string());
            let source = b.resolve(&lane_id, &raw.source)?;
            let target = b.resolve(&lane_id, &raw.target)?;
            if !(raw.dist_km.is_finite() && raw.dist_km >= 0.0) {
                return Err(GraphLoadError::InvalidDistance { lane: lane_id, km: raw.dist_km });
            }
            let geometry = if raw.geometry.is_empty() {
                vec![b.node_pos(source), b.node_pos(target)]
            } else {
                raw.geometry.into_iter().map(GeoPoint::from_lon_lat).collect()
            };
            b.add_lane(Edge {
                source,
                target,
                distance_km: raw.dist_km,
                geometry,
                chokepoints: raw.chokepoints,
                lane_id,
                kind: LaneKind::Lane,
            });
        }

        for (key, raw) in payload.ports {
            let id = raw.id.unwrap_or(key);
            let pos = GeoPoint::new(raw.lat, raw.lon);
            check_coord(|| format!("port {id}"), pos)?;
            let Some(node) = b.node_id(&raw.node_id) else {
                return Err(GraphLoadError::UnknownPortNode { port: id, node: raw.node_id });
            };
            let snap_km = pos.distance_km(b.node_pos(node));
            if snap_km > FAR_PORT_KM {
                warn!(port = %id, node = %raw.node_id, snap_km, "port is far from its graph node");
            }
            b.add_port(Port {
                id,
                name: raw.name,
                country: raw.country,
                pos,
                node,
                distance_to_node: raw.dist_to_node,
            });
        }

        for (key, raw) in payload.chokepoints {
            let name = raw.name.unwrap_or(key);
            let pos = GeoPoint::new(raw.lat, raw.lon);
            check_coord(|| format!("chokepoint {name}"), pos)?;
            b.add_chokepoint(Chokepoint { name, pos });
        }

        let graph = b.build_with(dateline);
        info!(
            nodes = graph.node_count(),
            lanes = graph.edge_count() - graph.bridge_count(),
            bridges = graph.bridge_count(),
            ports = graph.port_count(),
            chokepoints = graph.chokepoints.len(),
            "graph loaded"
        );
        Ok(graph)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Lanes including dateline bridges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    pub fn bridge_count(&self) -> usize {
        self.bridge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// See [`GraphIndex`] field docs; `0.0` when there are no bridges.
    pub fn max_bridge_shortcut_km(&self) -> f64 {
        self.max_bridge_shortcut_km
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn port(&self, id: PortId) -> &Port {
        &self.ports[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Port catalog, for selection lists.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Chokepoint catalog, for selection lists.
    pub fn chokepoints(&self) -> &[Chokepoint] {
        &self.chokepoints
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_by_key.get(key).copied()
    }

    pub fn port_id(&self, id: &str) -> Option<PortId> {
        self.port_by_id.get(id).copied()
    }

    pub fn port_by_id(&self, id: &str) -> Option<&Port> {
        self.port_id(id).map(|p| self.port(p))
    }

    pub fn chokepoint(&self, name: &str) -> Option<&Chokepoint> {
        self.chokepoints.iter().find(|c| c.name == name)
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Lanes touching `node`, each paired with the node at the other end.
    #[inline]
    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, NodeId)> + '_ {
        let start = self.node_adj_start[node.index()] as usize;
        let end   = self.node_adj_start[node.index() + 1] as usize;
        self.adj_edges[start..end]
            .iter()
            .map(move |&e| (e, self.edges[e.index()].other(node)))
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.node_adj_start[node.index()] as usize;
        let end   = self.node_adj_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest mesh node to `pos`; `None` only for an empty graph.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.node_idx.nearest_neighbor(&[pos.lat, pos.lon]).map(|e| e.id)
    }

    /// Nearest port to `pos`; `None` if there are no ports.
    pub fn nearest_port(&self, pos: GeoPoint) -> Option<PortId> {
        self.port_idx.nearest_neighbor(&[pos.lat, pos.lon]).map(|e| e.id)
    }

    /// Up to `k` ports nearest to `pos`, closest first.
    pub fn k_nearest_ports(&self, pos: GeoPoint, k: usize) -> Vec<PortId> {
        self.port_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

impl std::fmt::Debug for GraphIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphIndex")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("bridges", &self.bridge_count)
            .field("ports", &self.ports.len())
            .field("chokepoints", &self.chokepoints.len())
            .finish_non_exhaustive()
    }
}

fn check_coord(what: impl FnOnce() -> String, pos: GeoPoint) -> GraphResult<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(GraphLoadError::InvalidCoordinate { what: what(), lat: pos.lat, lon: pos.lon })
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`GraphIndex`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use mt_core::GeoPoint;
/// use mt_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_node("a", GeoPoint::new(0.0, 0.0));
/// let c = b.add_node("c", GeoPoint::new(0.0, 1.0));
/// b.add_simple_lane("a-c", a, c, 111.2, &[]);
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.degree(a), 1);
/// assert_eq!(g.degree(c), 1);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes:       Vec<Node>,
    edges:       Vec<Edge>,
    ports:       Vec<Port>,
    chokepoints: Vec<Chokepoint>,
    node_by_key: FxHashMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            ..Self::default()
        }
    }

    /// Add a node and return its id (sequential from 0).  Re-adding a key
    /// returns the existing id unchanged.
    pub fn add_node(&mut self, key: impl Into<String>, pos: GeoPoint) -> NodeId {
        let key = key.into();
        if let Some(&id) = self.node_by_key.get(&key) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len());
        self.node_by_key.insert(key.clone(), id);
        self.nodes.push(Node { key, pos });
        id
    }

    pub fn add_lane(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(edge);
        id
    }

    /// Convenience: a straight lane between two nodes, geometry running
    /// `a → b`.
    pub fn add_simple_lane(
        &mut self,
        lane_id: &str,
        a: NodeId,
        b: NodeId,
        distance_km: f64,
        chokepoints: &[&str],
    ) -> EdgeId {
        let geometry = vec![self.node_pos(a), self.node_pos(b)];
        self.add_lane(Edge {
            source: a,
            target: b,
            distance_km,
            geometry,
            chokepoints: chokepoints.iter().map(|c| c.to_string()).collect(),
            lane_id: lane_id.to_string(),
            kind: LaneKind::Lane,
        })
    }

    pub fn add_port(&mut self, port: Port) -> PortId {
        let id = PortId::from_index(self.ports.len());
        self.ports.push(port);
        id
    }

    /// Convenience: a port sitting exactly on `node`.
    pub fn add_port_at(&mut self, id: &str, name: &str, node: NodeId) -> PortId {
        let pos = self.node_pos(node);
        self.add_port(Port {
            id: id.to_string(),
            name: name.to_string(),
            country: String::new(),
            pos,
            node,
            distance_to_node: 0.0,
        })
    }

    pub fn add_chokepoint(&mut self, chokepoint: Chokepoint) {
        self.chokepoints.push(chokepoint);
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_by_key.get(key).copied()
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()].pos
    }

    fn resolve(&self, lane: &str, key: &str) -> GraphResult<NodeId> {
        self.node_id(key).ok_or_else(|| GraphLoadError::UnknownNode {
            lane: lane.to_string(),
            node: key.to_string(),
        })
    }

    /// Build with default dateline settings.
    pub fn build(self) -> GraphIndex {
        self.build_with(&DatelineConfig::default())
    }

    /// Consume the builder: add dateline bridges, lay out the CSR arrays,
    /// and bulk-load the R-trees.
    ///
    /// Bridges are derived here and nowhere else, so a graph can never be
    /// bridged twice.
    pub fn build_with(mut self, dateline: &DatelineConfig) -> GraphIndex {
        let bridges = dateline_bridges(&self.nodes, dateline);
        let bridge_count = bridges.len();
        let mut max_bridge_shortcut_km: f64 = 0.0;
        for bridge in bridges {
            let span = self.node_pos(bridge.source).distance_km(self.node_pos(bridge.target));
            max_bridge_shortcut_km = max_bridge_shortcut_km.max(span - bridge.distance_km);
            self.edges.push(bridge);
        }
        if bridge_count > 0 {
            debug!(bridge_count, max_bridge_shortcut_km, "dateline bridges added");
        }

        let node_count = self.nodes.len();

        // Each lane is listed under both endpoints (once for a self-loop).
        let mut node_adj_start = vec![0u32; node_count + 1];
        for e in &self.edges {
            node_adj_start[e.source.index() + 1] += 1;
            if e.target != e.source {
                node_adj_start[e.target.index() + 1] += 1;
            }
        }
        for i in 1..=node_count {
            node_adj_start[i] += node_adj_start[i - 1];
        }

        let mut fill: Vec<u32> = node_adj_start[..node_count].to_vec();
        let mut adj_edges = vec![EdgeId::INVALID; node_adj_start[node_count] as usize];
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId::from_index(i);
            adj_edges[fill[e.source.index()] as usize] = id;
            fill[e.source.index()] += 1;
            if e.target != e.source {
                adj_edges[fill[e.target.index()] as usize] = id;
                fill[e.target.index()] += 1;
            }
        }

        let node_idx = RTree::bulk_load(
            self.nodes
                .iter()
                .enumerate()
                .map(|(i, n)| Located { point: [n.pos.lat, n.pos.lon], id: NodeId::from_index(i) })
                .collect(),
        );
        let port_idx = RTree::bulk_load(
            self.ports
                .iter()
                .enumerate()
                .map(|(i, p)| Located { point: [p.pos.lat, p.pos.lon], id: PortId::from_index(i) })
                .collect(),
        );

        let mut port_by_id = FxHashMap::default();
        for (i, p) in self.ports.iter().enumerate() {
            port_by_id.insert(p.id.clone(), PortId::from_index(i));
        }

        GraphIndex {
            nodes: self.nodes,
            edges: self.edges,
            ports: self.ports,
            chokepoints: self.chokepoints,
            node_adj_start,
            adj_edges,
            node_by_key: self.node_by_key,
            port_by_id,
            bridge_count,
            max_bridge_shortcut_km,
            node_idx,
            port_idx,
        }
    }
}
