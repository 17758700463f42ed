//! End-to-end diversion advice for a flight in progress.

use crate::aircraft::AircraftProfile;
use crate::airports::AirportCatalogue;
use crate::diversion::DiversionEvaluator;
use crate::error::Result;
use crate::models::AlternateSelection;
use crate::position::{estimate_position, FlightPath};
use crate::region::{regional_candidates, Region};
use crate::rules::DiversionRules;
use crate::selector::select;
use crate::weather::WeatherSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversionAdvice {
    pub flight_id: String,
    pub region: Region,
    /// Estimated (lat, lon) the advice was computed from
    pub position: (f64, f64),
    pub aircraft: String,
    pub evaluated_at: DateTime<Utc>,
    pub selection: AlternateSelection,
}

/// Combines position estimation, regional narrowing and alternate selection.
#[derive(Debug, Clone)]
pub struct DiversionAdvisor<W> {
    airports: AirportCatalogue,
    weather: W,
    rules: DiversionRules,
}

impl<W: WeatherSource> DiversionAdvisor<W> {
    pub fn new(airports: AirportCatalogue, weather: W) -> Self {
        Self::with_rules(airports, weather, DiversionRules::default())
    }

    pub fn with_rules(airports: AirportCatalogue, weather: W, rules: DiversionRules) -> Self {
        Self {
            airports,
            weather,
            rules,
        }
    }

    pub fn airports(&self) -> &AirportCatalogue {
        &self.airports
    }

    /// Evaluator for an aircraft type label; unknown labels use the default profile.
    pub fn evaluator(&self, aircraft_label: &str) -> DiversionEvaluator<'_, W> {
        DiversionEvaluator::with_rules(
            AircraftProfile::lookup(aircraft_label),
            &self.weather,
            self.rules.clone(),
        )
    }

    /// Best alternate for `flight` at `now` with `fuel_remaining_kg` on board.
    pub fn advise(
        &self,
        flight: &FlightPath,
        now: DateTime<Utc>,
        fuel_remaining_kg: f64,
        aircraft_label: &str,
    ) -> Result<DiversionAdvice> {
        let (lat, lon) = estimate_position(flight, now);
        let (region, candidates) =
            regional_candidates(&flight.origin, &flight.destination, lat, lon, &self.airports);

        let evaluator = self.evaluator(aircraft_label);
        let selection = select(&evaluator, lat, lon, fuel_remaining_kg, &candidates)?;

        tracing::info!(
            "Flight {} at ({:.3}, {:.3}) in {}: best alternate {} ({} of {} reachable)",
            flight.flight_id,
            lat,
            lon,
            region,
            selection.best.alternate.name,
            selection.reachable_count(),
            selection.all.len()
        );

        Ok(DiversionAdvice {
            flight_id: flight.flight_id.clone(),
            region,
            position: (lat, lon),
            aircraft: evaluator.profile().identifier.clone(),
            evaluated_at: now,
            selection,
        })
    }
}
