//! Fuel feasibility of diverting to a single alternate.

use crate::aircraft::AircraftProfile;
use crate::models::{DiversionResult, Waypoint};
use crate::rules::DiversionRules;
use crate::spatial::{
    distance_nm, initial_bearing_deg, midpoint, tailwind_component, tas_from_cas_with_rules,
};
use crate::weather::WeatherSource;

/// Unrounded diversion figures. Rank and chain on these; round only for output.
#[derive(Debug, Clone, PartialEq)]
pub struct DiversionEstimate {
    pub alternate: Waypoint,
    pub distance_nm: f64,
    pub track_deg: f64,
    pub true_airspeed_kt: f64,
    pub tailwind_kt: f64,
    pub ground_speed_kt: f64,
    pub ground_speed_floored: bool,
    pub time_hr: f64,
    pub fuel_required_kg: f64,
    pub remaining_fuel_kg: f64,
    pub reachable: bool,
}

impl DiversionEstimate {
    /// Display form: one decimal for distance, speed and fuel, two for time.
    pub fn to_result(&self) -> DiversionResult {
        DiversionResult {
            alternate: self.alternate.clone(),
            distance_nm: round_to(self.distance_nm, 1),
            ground_speed_kt: round_to(self.ground_speed_kt, 1),
            time_hr: round_to(self.time_hr, 2),
            fuel_required_kg: round_to(self.fuel_required_kg, 1),
            remaining_fuel_kg: round_to(self.remaining_fuel_kg, 1),
            reachable: self.reachable,
            notes: self.notes(),
        }
    }

    fn notes(&self) -> String {
        let mut notes = if self.reachable {
            format!(
                "Reachable with {:.1} kg above reserve",
                self.remaining_fuel_kg
            )
        } else {
            format!("Fuel shortfall of {:.1} kg", -self.remaining_fuel_kg)
        };
        if self.tailwind_kt.abs() >= 1.0 {
            let kind = if self.tailwind_kt > 0.0 {
                "tailwind"
            } else {
                "headwind"
            };
            notes.push_str(&format!(", {:.0} kt {}", self.tailwind_kt.abs(), kind));
        }
        if self.ground_speed_floored {
            notes.push_str(", ground speed held at floor");
        }
        notes
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Evaluates diversions for one aircraft against a borrowed weather source.
#[derive(Debug)]
pub struct DiversionEvaluator<'w, W: ?Sized> {
    profile: AircraftProfile,
    weather: &'w W,
    rules: DiversionRules,
}

impl<'w, W: WeatherSource + ?Sized> DiversionEvaluator<'w, W> {
    pub fn new(profile: AircraftProfile, weather: &'w W) -> Self {
        Self::with_rules(profile, weather, DiversionRules::default())
    }

    pub fn with_rules(profile: AircraftProfile, weather: &'w W, rules: DiversionRules) -> Self {
        Self {
            profile,
            weather,
            rules,
        }
    }

    pub fn profile(&self) -> &AircraftProfile {
        &self.profile
    }

    pub fn rules(&self) -> &DiversionRules {
        &self.rules
    }

    /// Unrounded figures for diverting from the current position to `alternate`.
    pub fn estimate(
        &self,
        current_lat: f64,
        current_lon: f64,
        fuel_remaining_kg: f64,
        alternate: &Waypoint,
    ) -> DiversionEstimate {
        estimate_diversion(
            current_lat,
            current_lon,
            fuel_remaining_kg,
            alternate,
            &self.profile,
            self.weather,
            &self.rules,
        )
    }

    pub fn evaluate(
        &self,
        current_lat: f64,
        current_lon: f64,
        fuel_remaining_kg: f64,
        alternate: &Waypoint,
    ) -> DiversionResult {
        self.estimate(current_lat, current_lon, fuel_remaining_kg, alternate)
            .to_result()
    }
}

/// Diversion feasibility with default rules, rounded for display.
pub fn evaluate<W: WeatherSource + ?Sized>(
    current_lat: f64,
    current_lon: f64,
    fuel_remaining_kg: f64,
    alternate: &Waypoint,
    profile: &AircraftProfile,
    weather: &W,
) -> DiversionResult {
    estimate_diversion(
        current_lat,
        current_lon,
        fuel_remaining_kg,
        alternate,
        profile,
        weather,
        &DiversionRules::default(),
    )
    .to_result()
}

/// Core performance model. Weather is sampled once at the leg midpoint at
/// cruise altitude.
pub fn estimate_diversion<W: WeatherSource + ?Sized>(
    current_lat: f64,
    current_lon: f64,
    fuel_remaining_kg: f64,
    alternate: &Waypoint,
    profile: &AircraftProfile,
    weather: &W,
    rules: &DiversionRules,
) -> DiversionEstimate {
    let distance = distance_nm(current_lat, current_lon, alternate.lat, alternate.lon);
    let track_deg = initial_bearing_deg(current_lat, current_lon, alternate.lat, alternate.lon);

    let (mid_lat, mid_lon) = midpoint(current_lat, current_lon, alternate.lat, alternate.lon);
    let sample = weather.sample(mid_lat, mid_lon, profile.altitude_ft);

    let tas = tas_from_cas_with_rules(
        profile.cruise_cas_kt,
        profile.altitude_ft,
        sample.isa_dev_c,
        rules,
    );
    let tailwind = tailwind_component(sample.wind_dir_deg, sample.wind_speed_kt, track_deg);
    let raw_ground_speed = tas + tailwind;
    let ground_speed = raw_ground_speed.max(rules.ground_speed_floor_kt);

    let time_hr = distance / ground_speed;
    let fuel_required_kg = time_hr * profile.fuel_flow_kg_per_hr + profile.fuel_reserve_kg;
    let remaining_fuel_kg = fuel_remaining_kg - fuel_required_kg;

    DiversionEstimate {
        alternate: alternate.clone(),
        distance_nm: distance,
        track_deg,
        true_airspeed_kt: tas,
        tailwind_kt: tailwind,
        ground_speed_kt: ground_speed,
        ground_speed_floored: raw_ground_speed < rules.ground_speed_floor_kt,
        time_hr,
        fuel_required_kg,
        remaining_fuel_kg,
        reachable: remaining_fuel_kg >= 0.0,
    }
}
