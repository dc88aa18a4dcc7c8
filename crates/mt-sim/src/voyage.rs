//! A solved route sailed at constant speed from a departure time.

use mt_core::{GeoPoint, MS_PER_HOUR, Playback, voyage_hours};
use mt_route::RouteResult;

use crate::position::{position_at_distance, position_at_time, route_length_km};

/// One vessel's passage along a route.
///
/// Timing uses the geometric length of the segments rather than the lane
/// distances the router summed, so position, progress and ETA all agree
/// with what is drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Voyage {
    segments:     Vec<Vec<GeoPoint>>,
    departure_ms: i64,
    speed_kmh:    f64,
    total_km:     f64,
}

impl Voyage {
    pub fn new(segments: Vec<Vec<GeoPoint>>, departure_ms: i64, speed_kmh: f64) -> Self {
        let total_km = route_length_km(&segments);
        Self { segments, departure_ms, speed_kmh, total_km }
    }

    /// Sail `route` from `departure_ms`.  A trivial route becomes a voyage
    /// that stays at its single point.
    pub fn from_route(route: &RouteResult, departure_ms: i64, speed_kmh: f64) -> Self {
        let segments = if route.segments.is_empty() {
            vec![route.full_geometry.clone()]
        } else {
            route.segments.clone()
        };
        Self::new(segments, departure_ms, speed_kmh)
    }

    pub fn segments(&self) -> &[Vec<GeoPoint>] {
        &self.segments
    }

    pub fn departure_ms(&self) -> i64 {
        self.departure_ms
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn total_km(&self) -> f64 {
        self.total_km
    }

    pub fn duration_hours(&self) -> f64 {
        voyage_hours(self.total_km, self.speed_kmh)
    }

    /// Arrival time, Unix milliseconds.
    pub fn eta_unix_ms(&self) -> i64 {
        self.departure_ms + (self.duration_hours() * MS_PER_HOUR).round() as i64
    }

    /// Position at wall-clock `now_ms`; `None` before departure.
    pub fn position_at(&self, now_ms: i64) -> Option<GeoPoint> {
        position_at_time(&self.segments, self.departure_ms, now_ms, self.speed_kmh)
    }

    /// Position `hours` after departure, clamped to the route.
    pub fn position_at_elapsed(&self, hours: f64) -> Option<GeoPoint> {
        position_at_distance(&self.segments, hours * self.speed_kmh)
    }

    pub fn position_at_playback(&self, playback: &Playback) -> Option<GeoPoint> {
        position_at_distance(&self.segments, playback.distance_km(self.speed_kmh))
    }

    /// Fraction of the route covered at `now_ms`, in `[0.0, 1.0]`.
    ///
    /// Returns `1.0` for a zero-length route once departed.
    pub fn progress(&self, now_ms: i64) -> f64 {
        if now_ms < self.departure_ms {
            return 0.0;
        }
        let total = self.duration_hours();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = (now_ms - self.departure_ms) as f64 / MS_PER_HOUR;
        (elapsed / total).min(1.0)
    }

    pub fn has_arrived(&self, now_ms: i64) -> bool {
        now_ms >= self.eta_unix_ms()
    }
}
