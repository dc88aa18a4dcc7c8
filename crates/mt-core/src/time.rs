//! Simulation time model.
//!
//! # Design
//!
//! Vessel position is a pure function of *distance travelled*.  Two time
//! sources feed that distance:
//!
//! - **Wall clock**: `hours = (now_ms - departure_ms) / 3_600_000`, computed
//!   by `mt-sim` from Unix-millisecond timestamps.
//! - **Playback**: a synthetic elapsed-hours counter, [`Playback`], stepped
//!   by a fixed increment per UI tick and looped over the voyage length.
//!
//! `Playback` is a plain `Copy` value.  The host owns it and advances it;
//! nothing in the engine holds onto one.

use std::fmt;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Hours needed to cover `distance_km` at `speed_kmh`.
///
/// Returns `0.0` for a non-positive speed rather than dividing by zero.
#[inline]
pub fn voyage_hours(distance_km: f64, speed_kmh: f64) -> f64 {
    if speed_kmh > 0.0 { distance_km / speed_kmh } else { 0.0 }
}

/// Hours elapsed between two Unix-millisecond timestamps (negative if
/// `now_ms` is before `start_ms`).
#[inline]
pub fn hours_between(start_ms: i64, now_ms: i64) -> f64 {
    (now_ms - start_ms) as f64 / MS_PER_HOUR
}

// ── Playback ──────────────────────────────────────────────────────────────────

/// Fast-forward clock for replaying a voyage independent of wall time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Playback {
    /// Simulated hours since departure; always within `[0, total_hours)`
    /// once `advance` has been called with a positive total.
    pub elapsed_hours: f64,
    /// Hours added per [`advance`](Self::advance).
    pub step_hours: f64,
}

impl Playback {
    pub fn new(step_hours: f64) -> Self {
        Self { elapsed_hours: 0.0, step_hours }
    }

    /// Step forward once, looping back to the start when the voyage of
    /// `total_hours` is complete.
    ///
    /// A voyage of zero (or non-finite) length pins the clock at `0.0`.
    pub fn advance(&mut self, total_hours: f64) {
        if !(total_hours.is_finite() && total_hours > 0.0) {
            self.elapsed_hours = 0.0;
            return;
        }
        self.elapsed_hours = (self.elapsed_hours + self.step_hours).rem_euclid(total_hours);
    }

    /// Distance covered so far at `speed_kmh`.
    #[inline]
    pub fn distance_km(&self, speed_kmh: f64) -> f64 {
        self.elapsed_hours * speed_kmh
    }

    /// Jump back to departure.
    pub fn rewind(&mut self) {
        self.elapsed_hours = 0.0;
    }

    /// Break elapsed time into `(days, hours, minutes)` for display.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_min = (self.elapsed_hours.max(0.0) * 60.0).floor() as u64;
        let days = total_min / 1_440;
        let hours = ((total_min % 1_440) / 60) as u32;
        let minutes = (total_min % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for Playback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "day {} {:02}:{:02}", d, h, m)
    }
}
