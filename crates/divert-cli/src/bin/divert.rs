use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use divert_cli::{report, Config, WeatherModel};
use divert_core::{
    select, AirportCatalogue, DiversionAdvisor, FlightTracker, RouteLibrary,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Long-haul diversion planning", long_about = None)]
struct Args {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in routes
    Routes,

    /// Estimate where a flight is along its route
    Track {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Departure time (RFC 3339)
        #[arg(long)]
        departure: String,
        /// Cruise ground speed in knots
        #[arg(long, default_value_t = 480.0)]
        speed: f64,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
        #[arg(long, default_value = "CLI001")]
        flight_id: String,
    },

    /// Evaluate diversion alternates from a given position
    Evaluate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Fuel on board in kg
        #[arg(long)]
        fuel: f64,
        /// Alternate airport code, repeatable
        #[arg(long = "alternate", required = true)]
        alternates: Vec<String>,
        #[arg(long, default_value = "Boeing 787-9")]
        aircraft: String,
    },

    /// Pick the best alternate for a flight in progress
    Advise {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        departure: String,
        #[arg(long)]
        fuel: f64,
        #[arg(long, default_value = "Boeing 787-9")]
        aircraft: String,
        #[arg(long, default_value_t = 480.0)]
        speed: f64,
        #[arg(long)]
        at: Option<String>,
        #[arg(long, default_value = "CLI001")]
        flight_id: String,
    },
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("invalid RFC 3339 time: {value}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn resolve_now(at: Option<&str>) -> Result<DateTime<Utc>> {
    at.map(parse_time).transpose().map(|t| t.unwrap_or_else(Utc::now))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("divert_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    tracing::debug!("Loaded config: {:?}", config);

    let airports = AirportCatalogue::standard();
    let library = Arc::new(RouteLibrary::standard().context("building route library")?);

    match args.command {
        Command::Routes => {
            let routes: Vec<_> = library.routes().collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                for route in routes {
                    println!("{}", report::route_line(route));
                }
            }
        }

        Command::Track {
            origin,
            destination,
            departure,
            speed,
            at,
            flight_id,
        } => {
            let departure = parse_time(&departure)?;
            let now = resolve_now(at.as_deref())?;
            let mut tracker = FlightTracker::new(library, airports);
            tracker.add_flight(&flight_id, &origin, &destination, departure, speed)?;
            let progress = tracker.progress(&flight_id, now)?;
            emit(args.json, &progress, report::progress)?;
        }

        Command::Evaluate {
            lat,
            lon,
            fuel,
            alternates,
            aircraft,
        } => {
            let mut candidates = Vec::with_capacity(alternates.len());
            for code in &alternates {
                match airports.waypoint(code) {
                    Some(wp) => candidates.push(wp),
                    None => bail!("unknown airport code: {code}"),
                }
            }

            let weather = WeatherModel::new(config.weather, config.weather_seed);
            let advisor = DiversionAdvisor::with_rules(airports, weather, config.rules());
            let evaluator = advisor.evaluator(&aircraft);
            if let [alternate] = candidates.as_slice() {
                let result = evaluator.evaluate(lat, lon, fuel, alternate);
                emit(args.json, &result, report::result_line)?;
            } else {
                let selection = select(&evaluator, lat, lon, fuel, &candidates)?;
                emit(args.json, &selection, report::selection)?;
            }
        }

        Command::Advise {
            origin,
            destination,
            departure,
            fuel,
            aircraft,
            speed,
            at,
            flight_id,
        } => {
            let departure = parse_time(&departure)?;
            let now = resolve_now(at.as_deref())?;

            let mut tracker = FlightTracker::new(library, airports.clone());
            let flight = tracker.add_flight(&flight_id, &origin, &destination, departure, speed)?;

            let weather = WeatherModel::new(config.weather, config.weather_seed);
            let advisor = DiversionAdvisor::with_rules(airports, weather, config.rules());
            let advice = advisor
                .advise(flight, now, fuel, &aircraft)
                .with_context(|| format!("advising flight {flight_id}"))?;
            emit(args.json, &advice, report::advice)?;
        }
    }

    Ok(())
}
