//! `mt-route`: shortest-path routing between ports and route geometry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`router`]  | `Router` trait, `AStarRouter`                            |
//! | [`penalty`] | `DelayPenalties`: chokepoint delays in hours             |
//! | [`stitch`]  | `stitch`, `unwrap_antimeridian`: continuous polylines    |
//! | [`result`]  | `RouteResult`                                            |
//! | [`error`]   | `RouteNotFound`                                          |

pub mod error;
pub mod penalty;
pub mod result;
pub mod router;
pub mod stitch;

#[cfg(test)]
mod tests;

pub use error::RouteNotFound;
pub use penalty::DelayPenalties;
pub use result::RouteResult;
pub use router::{AStarRouter, Router};
pub use stitch::{Stitched, stitch, unwrap_antimeridian};
