//! Core data models for the diversion engine.

use serde::{Deserialize, Serialize};

/// A named geographic point, optionally placed along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance from route start in nautical miles, set once the waypoint
    /// belongs to a route plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_nm: Option<f64>,
}

impl Waypoint {
    /// Create a free-standing waypoint (not yet part of a route).
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            cumulative_nm: None,
        }
    }

    /// Whether the coordinates lie within WGS84 degree bounds.
    pub fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    pub(crate) fn placed_at(&self, cumulative_nm: f64) -> Self {
        Self {
            cumulative_nm: Some(cumulative_nm),
            ..self.clone()
        }
    }
}

/// Weather at a given position and altitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Direction the wind blows from, degrees true
    pub wind_dir_deg: f64,
    pub wind_speed_kt: f64,
    /// Deviation from ISA temperature, °C
    pub isa_dev_c: f64,
}

/// Feasibility and cost of diverting to one alternate, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversionResult {
    pub alternate: Waypoint,
    pub distance_nm: f64,
    pub ground_speed_kt: f64,
    pub time_hr: f64,
    pub fuel_required_kg: f64,
    /// Fuel left on arrival at the alternate (negative = shortfall)
    pub remaining_fuel_kg: f64,
    pub reachable: bool,
    pub notes: String,
}

/// The chosen alternate together with every evaluated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateSelection {
    pub best: DiversionResult,
    /// Results in candidate input order
    pub all: Vec<DiversionResult>,
}

impl AlternateSelection {
    /// Number of candidates that can be reached with the fuel on board.
    pub fn reachable_count(&self) -> usize {
        self.all.iter().filter(|r| r.reachable).count()
    }
}
