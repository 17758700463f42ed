//! Tunable constants for the diversion performance model.

use serde::{Deserialize, Serialize};

/// Configuration for the diversion performance model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversionRules {
    /// Lowest ground speed the evaluator will use (knots)
    pub ground_speed_floor_kt: f64,
    /// Fractional TAS gain per 1000 ft of altitude
    pub tas_altitude_factor: f64,
    /// Fractional TAS gain per 15 °C of ISA deviation
    pub tas_temperature_factor: f64,
}

impl Default for DiversionRules {
    fn default() -> Self {
        Self {
            ground_speed_floor_kt: 100.0,
            tas_altitude_factor: 0.02,
            tas_temperature_factor: 0.02,
        }
    }
}

impl DiversionRules {
    /// Override the ground-speed floor, keeping the other defaults.
    pub fn with_ground_speed_floor(mut self, floor_kt: f64) -> Self {
        self.ground_speed_floor_kt = floor_kt;
        self
    }
}
