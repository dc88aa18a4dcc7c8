//! `mt-core`: foundational types for the maritime twin routing engine.
//!
//! This crate is a dependency of every other `mt-*` crate.  It has no `mt-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`, `PortId`                               |
//! | [`geo`]    | `GeoPoint`, haversine distance, longitude wrapping         |
//! | [`time`]   | `Playback` clock, hour/millisecond helpers                 |
//! | [`config`] | `TwinConfig`, `DatelineConfig`                             |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DatelineConfig, TwinConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, haversine_km, normalize_lon, wrapped_lon_delta};
pub use ids::{EdgeId, NodeId, PortId};
pub use time::{MS_PER_HOUR, Playback, hours_between, voyage_hours};

/// Average container-ship speed used to convert hours into distance:
/// 22 knots ≈ 40.74 km/h.
pub const DEFAULT_SHIP_SPEED_KMH: f64 = 40.74;
