//! Core error type.
//!
//! Sub-crates define their own error enums (`GraphLoadError`,
//! `RouteNotFound`); this one only covers what `mt-core` itself validates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `mt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
