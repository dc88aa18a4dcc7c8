use mt_core::CoreError;
use mt_graph::GraphLoadError;
use mt_route::RouteNotFound;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("graph load failed: {0}")]
    Graph(#[from] GraphLoadError),

    #[error(transparent)]
    Route(#[from] RouteNotFound),
}

pub type SimResult<T> = Result<T, SimError>;
