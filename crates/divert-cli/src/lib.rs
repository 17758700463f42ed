//! Command line front end for the diversion engine.
//!
//! The `divert` binary lists routes, tracks a flight along its route and
//! evaluates diversion alternates. Environment configuration and the weather
//! model selection live here so they can be tested without the binary.

pub mod config;
pub mod report;
pub mod weather;

pub use config::Config;
pub use weather::{WeatherKind, WeatherModel};
