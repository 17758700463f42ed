//! Diversion decision support for long-haul aircraft.
//!
//! Great-circle geodesy, a fixed route catalogue with time-based position
//! estimation, and a fuel-feasibility model that picks the safest reachable
//! alternate airport.

pub mod advisor;
pub mod aircraft;
pub mod airports;
pub mod diversion;
pub mod error;
pub mod models;
pub mod position;
pub mod region;
pub mod routes;
pub mod rules;
pub mod selector;
pub mod spatial;
pub mod weather;

pub use advisor::{DiversionAdvice, DiversionAdvisor};
pub use aircraft::{AircraftProfile, AircraftType};
pub use airports::{Airport, AirportCatalogue};
pub use diversion::{evaluate, DiversionEstimate, DiversionEvaluator};
pub use error::{DivertError, Result};
pub use models::{AlternateSelection, DiversionResult, WeatherSample, Waypoint};
pub use position::{estimate_position, track, FlightPath, FlightProgress, FlightTracker};
pub use region::{regional_candidates, Region};
pub use routes::{RouteLibrary, RouteLibraryBuilder, RoutePlan};
pub use rules::DiversionRules;
pub use selector::select;
pub use spatial::{
    distance_nm, initial_bearing_deg, interpolate_great_circle, tailwind_component, tas_from_cas,
};
pub use weather::{CalmWeather, JitteredWeather, SyntheticWeather, WeatherSource};
