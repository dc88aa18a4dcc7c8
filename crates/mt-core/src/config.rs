//! Engine configuration.
//!
//! Every tunable constant of the engine lives here with a `Default` matching
//! the production values.  Hosts typically deserialize a `TwinConfig` from a
//! JSON file (with the `serde` feature) and call [`TwinConfig::validate`]
//! before handing pieces of it to the loader, router and voyage.

use crate::{CoreError, CoreResult, DEFAULT_SHIP_SPEED_KMH};

/// Parameters of the synthetic antimeridian bridges added at graph load.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatelineConfig {
    /// Nodes with `|lon| >= edge_lon` are bridge candidates.  Default: 179.5.
    pub edge_lon: f64,
    /// Maximum latitude difference between bridged nodes, degrees.  Default: 0.5.
    pub max_lat_delta_deg: f64,
    /// Combined `sqrt(dLat² + dLonWrapped²)` must be below this, degrees.
    /// Default: 2.0.
    pub max_match_deg: f64,
    /// Nominal traversal cost of a bridge, km.  Default: 0.001.
    pub bridge_cost_km: f64,
}

impl Default for DatelineConfig {
    fn default() -> Self {
        Self {
            edge_lon:          179.5,
            max_lat_delta_deg: 0.5,
            max_match_deg:     2.0,
            bridge_cost_km:    0.001,
        }
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TwinConfig {
    /// Vessel speed used for penalty conversion and voyage timing, km/h.
    pub ship_speed_kmh: f64,

    /// Gap below which consecutive stitched points are treated as the same
    /// point, metres.  Default: 10.
    pub stitch_epsilon_m: f64,

    /// Simulated hours advanced per playback tick.  Default: 1.
    pub playback_step_hours: f64,

    pub dateline: DatelineConfig,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            ship_speed_kmh:      DEFAULT_SHIP_SPEED_KMH,
            stitch_epsilon_m:    10.0,
            playback_step_hours: 1.0,
            dateline:            DatelineConfig::default(),
        }
    }
}

impl TwinConfig {
    /// Reject values that would make routing or playback meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        positive("ship_speed_kmh", self.ship_speed_kmh)?;
        positive("playback_step_hours", self.playback_step_hours)?;
        non_negative("stitch_epsilon_m", self.stitch_epsilon_m)?;

        let d = &self.dateline;
        if !(d.edge_lon.is_finite() && d.edge_lon > 0.0 && d.edge_lon <= 180.0) {
            return Err(CoreError::Config(format!(
                "dateline.edge_lon must be in (0, 180], got {}",
                d.edge_lon
            )));
        }
        non_negative("dateline.max_lat_delta_deg", d.max_lat_delta_deg)?;
        positive("dateline.max_match_deg", d.max_match_deg)?;
        non_negative("dateline.bridge_cost_km", d.bridge_cost_km)?;
        Ok(())
    }
}

fn positive(name: &str, v: f64) -> CoreResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be positive, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> CoreResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be non-negative, got {v}")))
    }
}
