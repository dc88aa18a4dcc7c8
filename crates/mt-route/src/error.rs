//! Routing failure reasons.

use thiserror::Error;

/// Why no route could be produced between two ports.
///
/// Every variant maps to the host's single "route not found" outcome; the
/// distinction is kept for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteNotFound {
    #[error("unknown port {0:?}")]
    UnknownPort(String),

    #[error("origin port {0:?} is blockaded")]
    OriginBlocked(String),

    #[error("destination port {0:?} is blockaded")]
    DestinationBlocked(String),

    #[error("no open sea route from {from:?} to {to:?}")]
    Unreachable { from: String, to: String },
}
