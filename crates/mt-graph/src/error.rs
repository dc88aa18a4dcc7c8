//! Graph-load error type.

use thiserror::Error;

/// Errors produced while turning a payload into a [`GraphIndex`](crate::GraphIndex).
///
/// A failed load never affects an index the caller already holds: the index
/// is only constructed once every check has passed.
#[derive(Debug, Error)]
pub enum GraphLoadError {
    #[error("malformed graph payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("I/O error reading graph payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("lane {lane} references unknown node {node:?}")]
    UnknownNode { lane: String, node: String },

    #[error("port {port} is mapped to unknown node {node:?}")]
    UnknownPortNode { port: String, node: String },

    #[error("{what} has an invalid coordinate (lat {lat}, lon {lon})")]
    InvalidCoordinate { what: String, lat: f64, lon: f64 },

    #[error("lane {lane} has an invalid distance of {km} km")]
    InvalidDistance { lane: String, km: f64 },

    #[error("graph has too many {0} to index")]
    TooLarge(&'static str),
}

pub type GraphResult<T> = Result<T, GraphLoadError>;
