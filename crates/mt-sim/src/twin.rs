//! The `Twin` facade: one graph, the current blockades and delays, and a
//! router.

use tracing::{debug, info};

use mt_core::TwinConfig;
use mt_graph::{Blockades, Connectivity, GraphIndex, GraphPayload};
use mt_route::{AStarRouter, DelayPenalties, RouteNotFound, RouteResult, Router};

use crate::{SimResult, Voyage};

/// Everything a host needs to answer "how would a ship get from A to B
/// right now".
///
/// `Twin<R>` owns the immutable [`GraphIndex`] and the mutable scenario
/// state (blockades and delay penalties).  Each [`plan`](Self::plan) hands a
/// consistent snapshot of that state to the router, so a toggle can never
/// land halfway through a solve.  Hosts sharing a twin across threads wrap
/// it in their own lock.
pub struct Twin<R: Router = AStarRouter> {
    pub config:    TwinConfig,
    pub graph:     GraphIndex,
    pub blockades: Blockades,
    pub penalties: DelayPenalties,
    router:        R,
}

impl Twin<AStarRouter> {
    /// A twin over `graph` using the default A* router.
    pub fn new(graph: GraphIndex, config: TwinConfig) -> SimResult<Self> {
        let router = AStarRouter::from_config(&config);
        Self::with_router(graph, config, router)
    }

    /// Parse and load a graph payload, bridging the dateline per `config`.
    pub fn from_json_str(json: &str, config: TwinConfig) -> SimResult<Self> {
        config.validate()?;
        let payload = GraphPayload::from_json_str(json).map_err(mt_graph::GraphLoadError::from)?;
        let graph = GraphIndex::load_with(payload, &config.dateline)?;
        Self::new(graph, config)
    }
}

impl<R: Router> Twin<R> {
    pub fn with_router(graph: GraphIndex, config: TwinConfig, router: R) -> SimResult<Self> {
        config.validate()?;
        info!(
            nodes = graph.node_count(),
            ports = graph.port_count(),
            speed_kmh = config.ship_speed_kmh,
            "twin ready"
        );
        Ok(Self {
            config,
            graph,
            blockades: Blockades::new(),
            penalties: DelayPenalties::new(),
            router,
        })
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Flip the closure of port `id`.  Returns `true` if it is now blocked.
    pub fn toggle_port(&mut self, id: &str) -> bool {
        let blocked = self.blockades.toggle_port(id);
        debug!(port = id, blocked, "port toggled");
        blocked
    }

    /// Flip the closure of chokepoint `name`.  Returns `true` if it is now
    /// blocked.
    pub fn toggle_chokepoint(&mut self, name: &str) -> bool {
        let blocked = self.blockades.toggle_chokepoint(name);
        debug!(chokepoint = name, blocked, "chokepoint toggled");
        blocked
    }

    /// Lift every blockade.  Delay penalties are kept.
    pub fn reset(&mut self) {
        self.blockades.reset();
        debug!("blockades cleared");
    }

    pub fn set_penalties(&mut self, penalties: DelayPenalties) {
        self.penalties = penalties;
    }

    /// Solve `origin` → `destination` under the current blockades and
    /// penalties.
    pub fn plan(&self, origin: &str, destination: &str) -> Result<RouteResult, RouteNotFound> {
        self.router
            .find_path(&self.graph, origin, destination, &self.blockades, &self.penalties)
    }

    /// Plan a route and sail it from `departure_ms` at the configured speed.
    pub fn depart(
        &self,
        origin: &str,
        destination: &str,
        departure_ms: i64,
    ) -> Result<Voyage, RouteNotFound> {
        let route = self.plan(origin, destination)?;
        Ok(Voyage::from_route(&route, departure_ms, self.config.ship_speed_kmh))
    }

    /// Connected components under the current blockades.
    pub fn connectivity(&self) -> Connectivity {
        Connectivity::compute(&self.graph, &self.blockades)
    }
}
