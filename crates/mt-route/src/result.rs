//! The outcome of a successful routing query.

use mt_core::{EdgeId, GeoPoint, NodeId, PortId, voyage_hours};

/// A solved port-to-port route.
///
/// `segments` holds one oriented polyline per traversed lane in raw
/// `[-180, 180]` longitudes; `full_geometry` is their de-duplicated
/// concatenation with longitudes unwrapped so it never jumps by more than
/// 180° between neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub origin: PortId,
    pub destination: PortId,
    /// Nodes from origin to destination, inclusive.
    pub node_ids: Vec<NodeId>,
    /// Lanes in travel order; `node_ids.len() == edges.len() + 1`.
    pub edges: Vec<EdgeId>,
    /// Lane ids of `edges`, bridges included.
    pub lane_ids: Vec<String>,
    /// Distinct chokepoints passed, in first-seen order.
    pub chokepoints: Vec<String>,
    /// Physical sea distance, km.  Delay penalties are not included.
    pub total_distance_km: f64,
    /// The cost the search minimised: distance plus delay penalties, km.
    pub weighted_cost_km: f64,
    pub segments: Vec<Vec<GeoPoint>>,
    pub full_geometry: Vec<GeoPoint>,
}

impl RouteResult {
    /// `true` if origin and destination share a node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sailing time at `speed_kmh`, hours.
    pub fn duration_hours(&self, speed_kmh: f64) -> f64 {
        voyage_hours(self.total_distance_km, speed_kmh)
    }

    /// Hours of delay the penalties added to the search cost.
    pub fn delay_hours(&self, speed_kmh: f64) -> f64 {
        voyage_hours(self.weighted_cost_km - self.total_distance_km, speed_kmh).max(0.0)
    }

    pub fn passes(&self, chokepoint: &str) -> bool {
        self.chokepoints.iter().any(|c| c == chokepoint)
    }

    pub fn crosses_dateline(&self) -> bool {
        self.lane_ids
            .iter()
            .any(|l| l.starts_with(mt_graph::BRIDGE_LANE_PREFIX))
    }
}
