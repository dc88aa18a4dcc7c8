//! `mt-sim`: vessel movement along solved routes.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`position`] | `position_at_distance`, `position_at_time`, route length    |
//! | [`voyage`]   | `Voyage`: a route sailed from a departure time              |
//! | [`twin`]     | `Twin`: graph, blockades, penalties and router together     |
//! | [`error`]    | `SimError`, `SimResult<T>`                                  |
//!
//! # Time models
//!
//! Both wall-clock and playback time reduce to a distance travelled, which
//! [`position_at_distance`] turns into a coordinate.  The host owns the
//! clock (a Unix timestamp or an [`mt_core::Playback`]); nothing here keeps
//! time on its own.

pub mod error;
pub mod position;
pub mod twin;
pub mod voyage;


pub use error::{SimError, SimResult};
pub use position::{position_at_distance, position_at_time, route_length_km};
pub use twin::Twin;
pub use voyage::Voyage;
