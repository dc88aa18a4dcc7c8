//! Joining per-lane geometries into one continuous polyline.
//!
//! Lane geometries are stored in whatever direction the source data drew
//! them, so a route's lanes must be re-oriented before they can be drawn or
//! sampled.  Orientation is decided geometrically: each lane is flipped iff
//! its last point lies closer than its first point to the reference, which
//! is the start anchor for the first lane and the end of the polyline built
//! so far for every later one.

use mt_core::GeoPoint;
use mt_graph::Edge;

/// Output of [`stitch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stitched {
    /// One oriented polyline per non-empty input lane.
    pub segments: Vec<Vec<GeoPoint>>,
    /// All segments concatenated, dropping any point within `epsilon_m` of
    /// its predecessor.
    pub merged: Vec<GeoPoint>,
}

/// Orient and concatenate the geometries of `edges`, in order.
///
/// Lanes with empty geometry are skipped.  A gap wider than `epsilon_m`
/// between consecutive lanes is kept as a straight connector: the next
/// lane's first point is simply appended.
pub fn stitch(edges: &[&Edge], start_anchor: GeoPoint, epsilon_m: f64) -> Stitched {
    let mut out = Stitched {
        segments: Vec::with_capacity(edges.len()),
        merged:   Vec::new(),
    };

    for edge in edges {
        let (Some(&first), Some(&last)) = (edge.geometry.first(), edge.geometry.last()) else {
            continue;
        };
        let reference = out.merged.last().copied().unwrap_or(start_anchor);

        let mut segment = edge.geometry.clone();
        if reference.distance_m(last) < reference.distance_m(first) {
            segment.reverse();
        }

        for &p in &segment {
            match out.merged.last() {
                Some(&prev) if prev.distance_m(p) <= epsilon_m => {}
                _ => out.merged.push(p),
            }
        }
        out.segments.push(segment);
    }
    out
}

/// Shift longitudes by multiples of 360° so no two consecutive points differ
/// by more than 180°.
///
/// The first point keeps its longitude; every later point carries the
/// cumulative offset of the wraps seen before it, so the result may leave
/// `[-180, 180]`.
pub fn unwrap_antimeridian(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut out = Vec::with_capacity(points.len());
    let mut offset = 0.0;
    let mut prev_lon: Option<f64> = None;

    for p in points {
        if let Some(prev) = prev_lon {
            let d = p.lon - prev;
            if d > 180.0 {
                offset -= 360.0;
            } else if d < -180.0 {
                offset += 360.0;
            }
        }
        prev_lon = Some(p.lon);
        out.push(GeoPoint::new(p.lat, p.lon + offset));
    }
    out
}
