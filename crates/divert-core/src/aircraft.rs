//! Static cruise performance reference data for supported aircraft types.

use serde::{Deserialize, Serialize};

/// Aircraft types with known cruise performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    #[serde(rename = "Boeing 787-9")]
    Boeing787_9,
    #[serde(rename = "Airbus A350-1000")]
    AirbusA350_1000,
    #[serde(rename = "Airbus A330-300")]
    AirbusA330_300,
    #[serde(rename = "Airbus A330-900")]
    AirbusA330_900,
}

impl AircraftType {
    pub const ALL: [AircraftType; 4] = [
        AircraftType::Boeing787_9,
        AircraftType::AirbusA350_1000,
        AircraftType::AirbusA330_300,
        AircraftType::AirbusA330_900,
    ];

    /// Display label, also the lookup key.
    pub fn label(self) -> &'static str {
        match self {
            AircraftType::Boeing787_9 => "Boeing 787-9",
            AircraftType::AirbusA350_1000 => "Airbus A350-1000",
            AircraftType::AirbusA330_300 => "Airbus A330-300",
            AircraftType::AirbusA330_900 => "Airbus A330-900",
        }
    }

    /// Parse an exact label; `None` for anything unrecognised.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl std::fmt::Display for AircraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Cruise performance used by the diversion evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub identifier: String,
    pub cruise_cas_kt: f64,
    pub altitude_ft: f64,
    pub fuel_flow_kg_per_hr: f64,
    /// Fixed reserve that must remain after reaching the alternate
    pub fuel_reserve_kg: f64,
}

impl AircraftProfile {
    pub fn for_type(aircraft: AircraftType) -> Self {
        let (cruise_cas_kt, altitude_ft, fuel_flow_kg_per_hr, fuel_reserve_kg) = match aircraft {
            AircraftType::Boeing787_9 => (485.0, 41_000.0, 2_800.0, 5_000.0),
            AircraftType::AirbusA350_1000 => (488.0, 41_000.0, 3_100.0, 5_500.0),
            AircraftType::AirbusA330_300 => (470.0, 39_000.0, 3_400.0, 5_000.0),
            AircraftType::AirbusA330_900 => (475.0, 41_000.0, 3_000.0, 5_000.0),
        };
        Self {
            identifier: aircraft.label().to_string(),
            cruise_cas_kt,
            altitude_ft,
            fuel_flow_kg_per_hr,
            fuel_reserve_kg,
        }
    }

    /// Resolve a profile by label. Unknown labels get the default profile.
    pub fn lookup(label: &str) -> Self {
        match AircraftType::from_label(label) {
            Some(aircraft) => Self::for_type(aircraft),
            None => {
                tracing::warn!("Unknown aircraft type {:?}, using default profile", label);
                Self::default()
            }
        }
    }
}

impl Default for AircraftProfile {
    fn default() -> Self {
        Self::for_type(AircraftType::Boeing787_9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_label() {
        let profile = AircraftProfile::lookup("Airbus A330-300");
        assert_eq!(profile.identifier, "Airbus A330-300");
        assert_eq!(profile.altitude_ft, 39_000.0);
    }

    #[test]
    fn test_lookup_unknown_label_falls_back() {
        let profile = AircraftProfile::lookup("Concorde");
        assert_eq!(profile, AircraftProfile::default());
        assert_eq!(profile.identifier, "Boeing 787-9");
    }

    #[test]
    fn test_labels_round_trip() {
        for aircraft in AircraftType::ALL {
            assert_eq!(AircraftType::from_label(aircraft.label()), Some(aircraft));
        }
        // Lookup is exact, not case-folded
        assert_eq!(AircraftType::from_label("boeing 787-9"), None);
    }

    #[test]
    fn test_787_reference_figures() {
        let profile = AircraftProfile::for_type(AircraftType::Boeing787_9);
        assert_eq!(profile.cruise_cas_kt, 485.0);
        assert_eq!(profile.altitude_ft, 41_000.0);
        assert_eq!(profile.fuel_flow_kg_per_hr, 2_800.0);
        assert_eq!(profile.fuel_reserve_kg, 5_000.0);
    }
}
