//! Distance along a route to a coordinate.
//!
//! Segments are walked as one continuous polyline: the step from the last
//! point of a segment to the first point of the next is travelled like any
//! other, so a gap between segments is crossed rather than jumped.
//! Longitudes may be raw (`[-180, 180]`) or unwrapped; results are always
//! normalised back into `[-180, 180]`.

use mt_core::{GeoPoint, hours_between, normalize_lon};

/// Great-circle length of the polyline formed by `segments`, km.
pub fn route_length_km(segments: &[Vec<GeoPoint>]) -> f64 {
    let mut total = 0.0;
    let mut prev: Option<GeoPoint> = None;
    for &p in segments.iter().flatten() {
        if let Some(q) = prev {
            total += q.distance_km(p);
        }
        prev = Some(p);
    }
    total
}

/// Point `distance_km` along `segments` from their first point.
///
/// Non-positive (or NaN) distances give the first point; distances beyond
/// the end give the last point.  `None` only when there are no points.
pub fn position_at_distance(segments: &[Vec<GeoPoint>], distance_km: f64) -> Option<GeoPoint> {
    let mut points = segments.iter().flatten().copied();
    let first = points.next()?;
    if !(distance_km > 0.0) {
        return Some(normalized(first));
    }

    let mut travelled = 0.0;
    let mut prev = first;
    for p in points {
        let leg = prev.distance_km(p);
        if leg > 0.0 {
            if travelled + leg >= distance_km {
                return Some(interpolate(prev, p, (distance_km - travelled) / leg));
            }
            travelled += leg;
        }
        prev = p;
    }
    Some(normalized(prev))
}

/// Position at wall-clock `now_ms` for a vessel that left at `start_ms` and
/// sails at `speed_kmh`.  `None` before departure.
pub fn position_at_time(
    segments: &[Vec<GeoPoint>],
    start_ms: i64,
    now_ms: i64,
    speed_kmh: f64,
) -> Option<GeoPoint> {
    if now_ms < start_ms {
        return None;
    }
    position_at_distance(segments, hours_between(start_ms, now_ms) * speed_kmh)
}

/// Linear interpolation in lat/lon, taking the short way across the
/// antimeridian.
fn interpolate(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    let mut b_lon = b.lon;
    if b_lon - a.lon > 180.0 {
        b_lon -= 360.0;
    } else if b_lon - a.lon < -180.0 {
        b_lon += 360.0;
    }
    GeoPoint::new(
        a.lat + (b.lat - a.lat) * t,
        normalize_lon(a.lon + (b_lon - a.lon) * t),
    )
}

fn normalized(p: GeoPoint) -> GeoPoint {
    GeoPoint::new(p.lat, normalize_lon(p.lon))
}
