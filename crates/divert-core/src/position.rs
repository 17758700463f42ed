//! Time-based position estimation along a planned route.

use crate::airports::AirportCatalogue;
use crate::error::{DivertError, Result};
use crate::routes::{RouteLibrary, RoutePlan};
use crate::spatial::interpolate_great_circle;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A flight flying a fixed route at constant cruise speed.
///
/// Deserialization validates through [`FlightPath::new`]; origin and
/// destination always come from the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FlightPathData")]
pub struct FlightPath {
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub cruise_speed_kt: f64,
    pub route: RoutePlan,
}

impl FlightPath {
    pub fn new(
        flight_id: impl Into<String>,
        departure_time: DateTime<Utc>,
        cruise_speed_kt: f64,
        route: RoutePlan,
    ) -> Result<Self> {
        if !cruise_speed_kt.is_finite() || cruise_speed_kt <= 0.0 {
            return Err(DivertError::InvalidCruiseSpeed(cruise_speed_kt));
        }
        Ok(Self {
            flight_id: flight_id.into(),
            origin: route.origin().to_string(),
            destination: route.destination().to_string(),
            departure_time,
            cruise_speed_kt,
            route,
        })
    }

    /// Hours since departure, zero before departure.
    pub fn elapsed_hr(&self, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = (now - self.departure_time).num_milliseconds() as f64;
        (elapsed_ms / MILLIS_PER_HOUR).max(0.0)
    }

    pub fn distance_flown_nm(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed_hr(now) * self.cruise_speed_kt
    }
}

#[derive(Deserialize)]
struct FlightPathData {
    flight_id: String,
    departure_time: DateTime<Utc>,
    cruise_speed_kt: f64,
    route: RoutePlan,
}

impl TryFrom<FlightPathData> for FlightPath {
    type Error = DivertError;

    fn try_from(data: FlightPathData) -> Result<Self> {
        Self::new(
            data.flight_id,
            data.departure_time,
            data.cruise_speed_kt,
            data.route,
        )
    }
}

/// Estimated (lat, lon) of the flight at `now`.
///
/// Before departure this is the first waypoint; once the planned distance
/// has been covered it is exactly the last waypoint.
pub fn estimate_position(flight: &FlightPath, now: DateTime<Utc>) -> (f64, f64) {
    position_at_distance(&flight.route, flight.distance_flown_nm(now))
}

/// Position `distance_nm` along the route.
pub fn position_at_distance(route: &RoutePlan, distance_nm: f64) -> (f64, f64) {
    let last = route.last();
    if distance_nm >= route.total_nm() {
        return (last.lat, last.lon);
    }

    let waypoints = route.waypoints();
    let Some(index) = (0..waypoints.len()).find(|&i| route.cumulative_at(i) >= distance_nm) else {
        return (last.lat, last.lon);
    };
    if index == 0 {
        return (waypoints[0].lat, waypoints[0].lon);
    }

    let from = &waypoints[index - 1];
    let to = &waypoints[index];
    let start_nm = route.cumulative_at(index - 1);
    let span_nm = route.cumulative_at(index) - start_nm;
    if span_nm <= 0.0 {
        return (to.lat, to.lon);
    }

    let fraction = (distance_nm - start_nm) / span_nm;
    interpolate_great_circle(from.lat, from.lon, to.lat, to.lon, fraction)
}

/// Tracking snapshot of a flight at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightProgress {
    pub flight_id: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_flown_nm: f64,
    pub remaining_nm: f64,
    /// First waypoint not yet passed; `None` once arrived
    pub next_waypoint: Option<String>,
    /// Planned arrival instant; stays fixed after arrival. `None` when it falls
    /// outside the representable time range (vanishingly slow cruise speed)
    pub eta: Option<DateTime<Utc>>,
    pub progress_pct: f64,
    pub arrived: bool,
}

/// Position, next waypoint, ETA and progress for `flight` at `now`.
pub fn track(flight: &FlightPath, now: DateTime<Utc>) -> FlightProgress {
    let route = &flight.route;
    let distance_flown_nm = flight.distance_flown_nm(now);
    let (lat, lon) = position_at_distance(route, distance_flown_nm);
    let remaining_nm = (route.total_nm() - distance_flown_nm).max(0.0);

    let next_waypoint = route
        .waypoints()
        .iter()
        .enumerate()
        .find(|&(i, _)| route.cumulative_at(i) > distance_flown_nm)
        .map(|(_, wp)| wp.name.clone());

    let eta = eta_at(now, route.total_nm() - distance_flown_nm, flight.cruise_speed_kt);

    let progress_pct = if route.total_nm() > 0.0 {
        (distance_flown_nm / route.total_nm() * 100.0).min(100.0)
    } else {
        100.0
    };

    FlightProgress {
        flight_id: flight.flight_id.clone(),
        lat,
        lon,
        distance_flown_nm,
        remaining_nm,
        next_waypoint,
        eta,
        progress_pct,
        arrived: distance_flown_nm >= route.total_nm(),
    }
}

/// `now` plus the time to fly `remaining_nm`, which is negative after arrival.
fn eta_at(now: DateTime<Utc>, remaining_nm: f64, cruise_speed_kt: f64) -> Option<DateTime<Utc>> {
    let remaining_ms = (remaining_nm / cruise_speed_kt * MILLIS_PER_HOUR).round();
    if !remaining_ms.is_finite() || remaining_ms.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = Duration::try_milliseconds(remaining_ms as i64)?;
    now.checked_add_signed(delta)
}

/// Keeps the flights being tracked and resolves their routes from a shared library.
#[derive(Debug)]
pub struct FlightTracker {
    library: Arc<RouteLibrary>,
    airports: AirportCatalogue,
    flights: HashMap<String, FlightPath>,
}

impl FlightTracker {
    pub fn new(library: Arc<RouteLibrary>, airports: AirportCatalogue) -> Self {
        Self {
            library,
            airports,
            flights: HashMap::new(),
        }
    }

    /// Start tracking a flight, replacing any existing flight with the same id.
    pub fn add_flight(
        &mut self,
        flight_id: &str,
        origin: &str,
        destination: &str,
        departure_time: DateTime<Utc>,
        cruise_speed_kt: f64,
    ) -> Result<&FlightPath> {
        let route = self
            .library
            .route_or_great_circle(origin, destination, &self.airports)?;
        let flight = FlightPath::new(flight_id, departure_time, cruise_speed_kt, route)?;
        tracing::debug!(
            "Tracking flight {} {}-{} ({:.1} nm)",
            flight_id,
            origin,
            destination,
            flight.route.total_nm()
        );
        self.flights.insert(flight_id.to_string(), flight);
        self.flight(flight_id)
    }

    pub fn flight(&self, flight_id: &str) -> Result<&FlightPath> {
        self.flights
            .get(flight_id)
            .ok_or_else(|| DivertError::UnknownFlight(flight_id.to_string()))
    }

    pub fn remove_flight(&mut self, flight_id: &str) -> Option<FlightPath> {
        self.flights.remove(flight_id)
    }

    pub fn progress(&self, flight_id: &str, now: DateTime<Utc>) -> Result<FlightProgress> {
        self.flight(flight_id).map(|flight| track(flight, now))
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;
    use crate::spatial::distance_nm;
    use chrono::TimeZone;

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn equator_route() -> RoutePlan {
        RoutePlan::from_waypoints(
            "A",
            "C",
            vec![
                Waypoint::new("A", 0.0, 0.0),
                Waypoint::new("B", 0.0, 10.0),
                Waypoint::new("C", 0.0, 20.0),
            ],
        )
        .unwrap()
    }

    fn flight(speed: f64) -> FlightPath {
        FlightPath::new("TST1", departure(), speed, equator_route()).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = FlightPath::new("X", departure(), 0.0, equator_route()).unwrap_err();
        assert_eq!(err, DivertError::InvalidCruiseSpeed(0.0));
        assert!(FlightPath::new("X", departure(), f64::NAN, equator_route()).is_err());
    }

    #[test]
    fn test_deserialize_validates_speed() {
        let mut value = serde_json::to_value(flight(480.0)).unwrap();
        let parsed: FlightPath = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(parsed, flight(480.0));

        value["cruise_speed_kt"] = serde_json::json!(-5.0);
        assert!(serde_json::from_value::<FlightPath>(value).is_err());
    }

    #[test]
    fn test_before_departure_is_origin() {
        let f = flight(480.0);
        let (lat, lon) = estimate_position(&f, departure() - Duration::hours(2));
        assert_eq!((lat, lon), (0.0, 0.0));
    }

    #[test]
    fn test_interpolates_within_segment() {
        let f = flight(480.0);
        let leg = f.route.total_nm() / 2.0;
        // Halfway along the first leg
        let hours = leg / 2.0 / 480.0;
        let now = departure() + Duration::milliseconds((hours * MILLIS_PER_HOUR) as i64);
        let (lat, lon) = estimate_position(&f, now);
        assert!(lat.abs() < 1e-6);
        assert!((lon - 5.0).abs() < 0.01, "got {lon}");
    }

    #[test]
    fn test_second_segment() {
        let f = flight(480.0);
        let target = f.route.total_nm() * 0.75;
        let (lat, lon) = position_at_distance(&f.route, target);
        assert!(lat.abs() < 1e-6);
        assert!((lon - 15.0).abs() < 0.01, "got {lon}");
        assert!((distance_nm(0.0, 0.0, lat, lon) - target).abs() < 0.01);
    }

    #[test]
    fn test_past_arrival_returns_last_waypoint_exactly() {
        let f = flight(480.0);
        let (lat, lon) = estimate_position(&f, departure() + Duration::hours(48));
        assert_eq!((lat, lon), (0.0, 20.0));
    }

    #[test]
    fn test_track_reports_next_waypoint_and_eta() {
        let f = flight(600.0);
        let now = departure() + Duration::hours(1);
        let progress = track(&f, now);

        assert!((progress.distance_flown_nm - 600.0).abs() < 1e-6);
        // 600 nm is short of B (~600.4 nm)
        assert_eq!(progress.next_waypoint.as_deref(), Some("B"));
        assert!(!progress.arrived);

        let expected_hr = (f.route.total_nm() - 600.0) / 600.0;
        let eta = progress.eta.unwrap();
        let eta_hr = (eta - now).num_milliseconds() as f64 / MILLIS_PER_HOUR;
        assert!((eta_hr - expected_hr).abs() < 1e-3);
        assert!((progress.progress_pct - 600.0 / f.route.total_nm() * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_track_after_arrival() {
        let f = flight(600.0);
        let now = departure() + Duration::hours(10);
        let progress = track(&f, now);
        assert!(progress.arrived);
        assert_eq!(progress.next_waypoint, None);
        assert_eq!(progress.progress_pct, 100.0);
        assert_eq!(progress.remaining_nm, 0.0);

        // ETA is the planned arrival, not the current instant
        let planned_ms = (f.route.total_nm() / 600.0 * MILLIS_PER_HOUR).round() as i64;
        let planned = departure() + Duration::milliseconds(planned_ms);
        for later in [now, now + Duration::hours(5)] {
            let eta = track(&f, later).eta.unwrap();
            assert!((eta - planned).num_milliseconds().abs() <= 1, "eta {eta} vs {planned}");
        }
    }

    #[test]
    fn test_track_with_tiny_speed_does_not_overflow() {
        let library = RouteLibrary::standard().unwrap();
        let route = library.get_route("LHR", "JFK").unwrap().clone();
        let slow = FlightPath::new("SLOW", departure(), 1e-6, route).unwrap();

        let progress = track(&slow, departure());
        assert_eq!(progress.eta, None);
        assert!(!progress.arrived);
        assert_eq!(progress.next_waypoint.as_deref(), Some("MALOT"));
        assert_eq!((progress.lat, progress.lon), (51.4775, -0.4614));
    }

    #[test]
    fn test_tracker_resolves_routes() {
        let library = Arc::new(RouteLibrary::standard().unwrap());
        let mut tracker = FlightTracker::new(library, AirportCatalogue::standard());

        let path = tracker
            .add_flight("BA117", "LHR", "JFK", departure(), 480.0)
            .unwrap();
        assert!(path.route.waypoints().len() > 2);

        tracker
            .add_flight("KL1000", "LHR", "AMS", departure(), 300.0)
            .unwrap();
        assert_eq!(tracker.flight("KL1000").unwrap().route.waypoints().len(), 2);

        assert_eq!(
            tracker
                .add_flight("BAD", "LHR", "ZZZ", departure(), 300.0)
                .unwrap_err(),
            DivertError::UnknownAirport("ZZZ".into())
        );
        assert_eq!(tracker.flight_count(), 2);

        let progress = tracker.progress("BA117", departure()).unwrap();
        assert_eq!(progress.next_waypoint.as_deref(), Some("MALOT"));

        assert!(tracker.remove_flight("BA117").is_some());
        assert!(matches!(
            tracker.progress("BA117", departure()),
            Err(DivertError::UnknownFlight(_))
        ));
    }
}
