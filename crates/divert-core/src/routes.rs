//! Waypoint routes and the route catalogue.
//!
//! A [`RouteLibrary`] is assembled once through [`RouteLibraryBuilder`] and is
//! read-only afterwards, so it can be shared across threads behind an `Arc`
//! without locking.

use crate::airports::{Airport, AirportCatalogue};
use crate::error::{DivertError, Result};
use crate::models::Waypoint;
use crate::spatial::distance_nm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An ordered origin-to-destination waypoint sequence with cumulative distances.
///
/// Invariants: at least two waypoints, `waypoints[0].cumulative_nm == Some(0.0)`,
/// cumulative distance non-decreasing, and `total_nm` equal to the last
/// cumulative value. Deserialization goes through [`RoutePlan::from_waypoints`],
/// so serialized cumulative distances and totals are recomputed, not trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoutePlanData")]
pub struct RoutePlan {
    origin: String,
    destination: String,
    waypoints: Vec<Waypoint>,
    total_nm: f64,
}

impl RoutePlan {
    /// Build a plan from authoritative waypoints, computing cumulative distances.
    ///
    /// Any cumulative distances already on the waypoints are ignored.
    pub fn from_waypoints(
        origin: impl Into<String>,
        destination: impl Into<String>,
        waypoints: Vec<Waypoint>,
    ) -> Result<Self> {
        let origin = origin.into();
        let destination = destination.into();

        if waypoints.len() < 2 {
            return Err(DivertError::InvalidRoute(format!(
                "{origin}-{destination} needs at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if let Some(bad) = waypoints.iter().find(|w| !w.has_valid_coordinates()) {
            return Err(DivertError::InvalidRoute(format!(
                "{origin}-{destination} waypoint {} has invalid coordinates ({}, {})",
                bad.name, bad.lat, bad.lon
            )));
        }

        let (waypoints, total_nm) = place_waypoints(&waypoints);
        Ok(Self {
            origin,
            destination,
            waypoints,
            total_nm,
        })
    }

    /// Two-waypoint great-circle plan directly between two airports.
    pub fn great_circle(origin: &Airport, destination: &Airport) -> Result<Self> {
        Self::from_waypoints(
            origin.code.clone(),
            destination.code.clone(),
            vec![origin.waypoint(), destination.waypoint()],
        )
    }

    /// The same path flown in the opposite direction.
    ///
    /// Cumulative distances are recomputed from the new start rather than
    /// mirrored from this plan.
    pub fn reversed(&self) -> Self {
        let reversed: Vec<Waypoint> = self.waypoints.iter().rev().cloned().collect();
        let (waypoints, total_nm) = place_waypoints(&reversed);
        Self {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            waypoints,
            total_nm,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn total_nm(&self) -> f64 {
        self.total_nm
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn last(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// Cumulative distance of waypoint `index`. Placed waypoints always carry one.
    pub(crate) fn cumulative_at(&self, index: usize) -> f64 {
        self.waypoints[index].cumulative_nm.unwrap_or(0.0)
    }
}

/// Wire form of a [`RoutePlan`] before validation.
#[derive(Deserialize)]
struct RoutePlanData {
    origin: String,
    destination: String,
    waypoints: Vec<Waypoint>,
}

impl TryFrom<RoutePlanData> for RoutePlan {
    type Error = DivertError;

    fn try_from(data: RoutePlanData) -> Result<Self> {
        Self::from_waypoints(data.origin, data.destination, data.waypoints)
    }
}

/// Assign cumulative distances by summing consecutive great-circle legs.
fn place_waypoints(waypoints: &[Waypoint]) -> (Vec<Waypoint>, f64) {
    let mut placed = Vec::with_capacity(waypoints.len());
    let mut cumulative = 0.0;
    let mut previous: Option<&Waypoint> = None;

    for waypoint in waypoints {
        if let Some(prev) = previous {
            cumulative += distance_nm(prev.lat, prev.lon, waypoint.lat, waypoint.lon);
        }
        placed.push(waypoint.placed_at(cumulative));
        previous = Some(waypoint);
    }

    (placed, cumulative)
}

type RouteKey = (String, String);

fn route_key(origin: &str, destination: &str) -> RouteKey {
    (origin.to_string(), destination.to_string())
}

/// Mutable registration phase of a [`RouteLibrary`].
#[derive(Debug, Default)]
pub struct RouteLibraryBuilder {
    routes: BTreeMap<RouteKey, RoutePlan>,
}

impl RouteLibraryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an explicit route. A later registration of the same pair replaces it.
    pub fn register(
        &mut self,
        origin: &str,
        destination: &str,
        waypoints: Vec<Waypoint>,
    ) -> Result<&mut Self> {
        let plan = RoutePlan::from_waypoints(origin, destination, waypoints)?;
        tracing::debug!(
            "Registered route {}-{} ({} waypoints, {:.1} nm)",
            origin,
            destination,
            plan.waypoints.len(),
            plan.total_nm
        );
        self.routes.insert(route_key(origin, destination), plan);
        Ok(self)
    }

    /// Derive missing reverse routes and freeze the library.
    pub fn build(mut self) -> RouteLibrary {
        let missing: Vec<RoutePlan> = self
            .routes
            .iter()
            .filter(|((origin, destination), _)| {
                !self
                    .routes
                    .contains_key(&(destination.clone(), origin.clone()))
            })
            .map(|(_, plan)| plan.reversed())
            .collect();

        tracing::debug!(
            "Derived {} reverse routes from {} registered",
            missing.len(),
            self.routes.len()
        );

        for plan in missing {
            self.routes
                .insert(route_key(&plan.origin, &plan.destination), plan);
        }

        RouteLibrary {
            routes: self.routes,
        }
    }
}

/// Read-only catalogue of named routes.
#[derive(Debug, Clone)]
pub struct RouteLibrary {
    routes: BTreeMap<RouteKey, RoutePlan>,
}

impl RouteLibrary {
    pub fn builder() -> RouteLibraryBuilder {
        RouteLibraryBuilder::new()
    }

    /// Library populated with the built-in long-haul routes and their reverses.
    pub fn standard() -> Result<Self> {
        let mut builder = Self::builder();
        for (origin, destination, fixes) in STANDARD_ROUTES {
            let waypoints = fixes
                .iter()
                .map(|&(name, lat, lon)| Waypoint::new(name, lat, lon))
                .collect();
            builder.register(origin, destination, waypoints)?;
        }
        Ok(builder.build())
    }

    pub fn get_route(&self, origin: &str, destination: &str) -> Option<&RoutePlan> {
        self.routes.get(&route_key(origin, destination))
    }

    /// Like [`get_route`](Self::get_route) but a missing pair is an error.
    pub fn require_route(&self, origin: &str, destination: &str) -> Result<&RoutePlan> {
        self.get_route(origin, destination)
            .ok_or_else(|| DivertError::RouteNotFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }

    /// The registered route, or a direct great-circle plan when both airports
    /// are catalogued.
    pub fn route_or_great_circle(
        &self,
        origin: &str,
        destination: &str,
        airports: &AirportCatalogue,
    ) -> Result<RoutePlan> {
        if let Some(plan) = self.get_route(origin, destination) {
            return Ok(plan.clone());
        }

        let from = airports
            .get(origin)
            .ok_or_else(|| DivertError::UnknownAirport(origin.to_string()))?;
        let to = airports
            .get(destination)
            .ok_or_else(|| DivertError::UnknownAirport(destination.to_string()))?;

        tracing::debug!(
            "No registered route {}-{}, using great-circle fallback",
            origin,
            destination
        );
        RoutePlan::great_circle(from, to)
    }

    /// All (origin, destination) pairs in lexical order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes
            .keys()
            .map(|(origin, destination)| (origin.as_str(), destination.as_str()))
    }

    pub fn routes(&self) -> impl Iterator<Item = &RoutePlan> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

type Fix = (&'static str, f64, f64);

const STANDARD_ROUTES: &[(&str, &str, &[Fix])] = &[
    (
        "LHR",
        "JFK",
        &[
            ("LHR", 51.4775, -0.4614),
            ("MALOT", 53.0, -15.0),
            ("54N020W", 54.0, -20.0),
            ("55N030W", 55.0, -30.0),
            ("54N040W", 54.0, -40.0),
            ("52N050W", 52.0, -50.0),
            ("YQX", 48.9369, -54.5681),
            ("JFK", 40.6413, -73.7781),
        ],
    ),
    (
        "LHR",
        "DEL",
        &[
            ("LHR", 51.4775, -0.4614),
            ("KOKSY", 51.10, 2.65),
            ("NATEX", 48.00, 16.00),
            ("ISTAN", 41.00, 29.00),
            ("TEHRN", 35.70, 51.40),
            ("KABUL", 34.50, 69.20),
            ("DEL", 28.5562, 77.1000),
        ],
    ),
    (
        "LHR",
        "SIN",
        &[
            ("LHR", 51.4775, -0.4614),
            ("KOKSY", 51.10, 2.65),
            ("NATEX", 48.00, 16.00),
            ("ERZUR", 39.95, 41.17),
            ("TUMAK", 30.00, 50.00),
            ("ARMUK", 24.00, 62.00),
            ("BOMBA", 19.00, 72.90),
            ("MADRA", 13.00, 80.20),
            ("SIN", 1.3644, 103.9915),
        ],
    ),
    (
        "LHR",
        "DXB",
        &[
            ("LHR", 51.4775, -0.4614),
            ("KOKSY", 51.10, 2.65),
            ("NATEX", 48.00, 16.00),
            ("ISTAN", 41.00, 29.00),
            ("ADANA", 37.00, 35.30),
            ("BAGDA", 33.30, 44.40),
            ("DXB", 25.2532, 55.3657),
        ],
    ),
    (
        "LHR",
        "GRU",
        &[
            ("LHR", 51.4775, -0.4614),
            ("LIZAD", 47.50, -8.00),
            ("LISBO", 38.80, -9.50),
            ("CANAR", 28.00, -16.00),
            ("SALIS", 16.70, -23.00),
            ("EQUAT", 0.00, -29.50),
            ("RECIF", -8.10, -34.90),
            ("GRU", -23.4356, -46.4731),
        ],
    ),
    (
        "LHR",
        "JNB",
        &[
            ("LHR", 51.4775, -0.4614),
            ("DIJON", 47.30, 5.00),
            ("ROMAN", 41.80, 12.20),
            ("TRIPO", 32.70, 13.20),
            ("NDJAM", 12.10, 15.00),
            ("KINSH", -4.40, 15.30),
            ("LUSAK", -15.30, 28.40),
            ("JNB", -26.1392, 28.2460),
        ],
    ),
    (
        "SIN",
        "SYD",
        &[
            ("SIN", 1.3644, 103.9915),
            ("JAKAR", -6.10, 106.70),
            ("DENPA", -8.70, 115.20),
            ("DRWIN", -12.40, 130.90),
            ("ALICE", -23.80, 133.90),
            ("SYD", -33.9399, 151.1753),
        ],
    ),
];
