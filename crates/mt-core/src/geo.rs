//! Geographic coordinate type and great-circle utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Ocean routes span thousands of
//! kilometres and are summed edge by edge, so single precision would drift
//! by whole kilometres over a voyage.
//!
//! Raw lane geometry arrives as `[lon, lat]` pairs (GeoJSON order); the
//! [`GeoPoint::from_lon_lat`] / [`GeoPoint::lon_lat`] helpers do the swap in
//! one place.

/// Mean Earth radius, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
///
/// Longitudes produced by antimeridian unwrapping may fall outside
/// `[-180, 180]`; every other producer keeps them in range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON-ordered `[lon, lat]` pair.
    #[inline]
    pub fn from_lon_lat([lon, lat]: [f64; 2]) -> Self {
        Self { lat, lon }
    }

    /// GeoJSON-ordered `[lon, lat]` pair.
    #[inline]
    pub fn lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Haversine great-circle distance in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }

    /// Haversine great-circle distance in metres.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        self.distance_km(other) * 1_000.0
    }

    /// `true` if latitude is within `[-90, 90]` and longitude within
    /// `[-180, 180]`, both finite.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// Standard great-circle distance in kilometres (Earth radius 6371 km).
///
/// Symmetric and total.  Longitudes need not be normalised: the
/// `sin²(Δλ/2)` term is identical for `Δλ` and `Δλ ± 360°`, so points either
/// side of the antimeridian come out close together.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat * 0.5).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon * 0.5).sin().powi(2);

    // Clamp guards against `a` creeping past 1.0 through rounding.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().atan2((1.0 - a).clamp(0.0, 1.0).sqrt());
    EARTH_RADIUS_KM * c
}

/// Shortest signed longitude difference `lon_b - lon_a`, in `[-180, 180]`.
///
/// `wrapped_lon_delta(179.0, -179.0) == 2.0` (eastward across the
/// antimeridian), not `-358.0`.
pub fn wrapped_lon_delta(lon_a: f64, lon_b: f64) -> f64 {
    let mut d = (lon_b - lon_a) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d < -180.0 {
        d += 360.0;
    }
    d
}

/// Bring any longitude back into `[-180, 180]`.
pub fn normalize_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the sign the caller was heading in.
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}
