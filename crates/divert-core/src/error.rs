//! Error type shared across the diversion engine.

use thiserror::Error;

/// Errors surfaced by route construction, tracking and alternate selection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DivertError {
    #[error("no route registered from {origin} to {destination}")]
    RouteNotFound { origin: String, destination: String },
    #[error("unknown airport: {0}")]
    UnknownAirport(String),
    #[error("invalid route: {0}")]
    InvalidRoute(String),
    #[error("cruise speed must be positive and finite, got {0} kt")]
    InvalidCruiseSpeed(f64),
    #[error("no candidate alternates to evaluate")]
    EmptyCandidateSet,
    #[error("unknown flight: {0}")]
    UnknownFlight(String),
}

pub type Result<T> = std::result::Result<T, DivertError>;
