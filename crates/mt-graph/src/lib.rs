//! `mt-graph`: the shipping-lane graph, dateline bridging, and blockades.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`payload`]  | `GraphPayload`: serde model of the input JSON               |
//! | [`network`]  | `GraphIndex` (CSR + R-trees), `GraphBuilder`, entity types  |
//! | [`dateline`] | `dateline_bridges`: antimeridian connector lanes            |
//! | [`blockade`] | `Blockades`: closed ports and chokepoints                   |
//! | [`stats`]    | `NetworkStats`, `Connectivity`                              |
//! | [`error`]    | `GraphLoadError`, `GraphResult<T>`                          |

pub mod blockade;
pub mod dateline;
pub mod error;
pub mod network;
pub mod payload;
pub mod stats;


pub use blockade::Blockades;
pub use dateline::{BRIDGE_LANE_PREFIX, dateline_bridges};
pub use error::{GraphLoadError, GraphResult};
pub use network::{Chokepoint, Edge, GraphBuilder, GraphIndex, LaneKind, Node, Port};
pub use payload::GraphPayload;
pub use stats::{Connectivity, NetworkStats};
