//! CLI configuration from environment.

use divert_core::DiversionRules;
use std::env;

use crate::weather::WeatherKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub weather: WeatherKind,
    pub weather_seed: u64,
    pub ground_speed_floor_kt: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather: WeatherKind::Synthetic,
            weather_seed: 42,
            ground_speed_floor_kt: DiversionRules::default().ground_speed_floor_kt,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            weather: lookup("DIVERT_WEATHER")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.weather),
            weather_seed: lookup("DIVERT_WEATHER_SEED")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.weather_seed),
            ground_speed_floor_kt: lookup("DIVERT_GS_FLOOR_KT")
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.ground_speed_floor_kt),
        }
    }

    pub fn rules(&self) -> DiversionRules {
        DiversionRules::default().with_ground_speed_floor(self.ground_speed_floor_kt)
    }
}
