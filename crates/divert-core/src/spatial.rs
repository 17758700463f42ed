//! Spherical geodesy for route and diversion calculations.
//!
//! All angles are decimal degrees on input and output, distances are
//! nautical miles and speeds are knots.

use crate::rules::DiversionRules;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Angular separations below this (radians) are treated as coincident points.
const COINCIDENT_RAD: f64 = 1e-12;

/// Calculate great-circle distance between two points in nautical miles
/// using the Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
pub fn distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    EARTH_RADIUS_NM * central_angle(lat1, lon1, lat2, lon2)
}

/// Central angle between two points in radians.
fn central_angle(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt())
}

/// Initial great-circle bearing (forward azimuth) from point 1 to point 2.
///
/// Returns degrees in `[0, 360)`, 0 = north, 90 = east.
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_deg(x.atan2(y).to_degrees())
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Component of the wind acting along `track_deg`, positive = tailwind.
///
/// `wind_dir_deg` is the direction the wind blows *from* (meteorological
/// convention); adding 180 turns it into the push vector.
pub fn tailwind_component(wind_dir_deg: f64, wind_speed_kt: f64, track_deg: f64) -> f64 {
    wind_speed_kt * (wind_dir_deg - track_deg + 180.0).to_radians().cos()
}

/// Point at fraction `f` along the great-circle arc from point 1 to point 2.
///
/// `f = 0` yields point 1 and `f = 1` yields point 2. Coincident endpoints
/// return point 1 unchanged.
pub fn interpolate_great_circle(lat1: f64, lon1: f64, lat2: f64, lon2: f64, f: f64) -> (f64, f64) {
    let d = central_angle(lat1, lon1, lat2, lon2);
    if d.abs() < COINCIDENT_RAD {
        return (lat1, lon1);
    }

    let phi1 = lat1.to_radians();
    let lambda1 = lon1.to_radians();
    let phi2 = lat2.to_radians();
    let lambda2 = lon2.to_radians();

    let sin_d = d.sin();
    let a = ((1.0 - f) * d).sin() / sin_d;
    let b = (f * d).sin() / sin_d;

    let x = a * phi1.cos() * lambda1.cos() + b * phi2.cos() * lambda2.cos();
    let y = a * phi1.cos() * lambda1.sin() + b * phi2.cos() * lambda2.sin();
    let z = a * phi1.sin() + b * phi2.sin();

    let lat = z.atan2((x * x + y * y).sqrt());
    let lon = y.atan2(x);

    (lat.to_degrees(), lon.to_degrees())
}

/// Approximate true airspeed from calibrated airspeed.
///
/// Engineering approximation of TAS growth with altitude and non-standard
/// temperature, not a substitute for certified performance tables.
pub fn tas_from_cas(cas_kt: f64, altitude_ft: f64, isa_dev_c: f64) -> f64 {
    tas_from_cas_with_rules(cas_kt, altitude_ft, isa_dev_c, &DiversionRules::default())
}

/// [`tas_from_cas`] with configurable correction factors.
pub fn tas_from_cas_with_rules(
    cas_kt: f64,
    altitude_ft: f64,
    isa_dev_c: f64,
    rules: &DiversionRules,
) -> f64 {
    cas_kt
        * (1.0 + rules.tas_altitude_factor * altitude_ft / 1000.0)
        * (1.0 + rules.tas_temperature_factor * isa_dev_c / 15.0)
}

/// Simple arithmetic midpoint of two positions.
///
/// Used as the weather sampling point for a diversion leg; it is not the
/// great-circle midpoint.
pub fn midpoint(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64) {
    ((lat1 + lat2) / 2.0, (lon1 + lon2) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LHR: (f64, f64) = (51.4775, -0.4614);
    const AMS: (f64, f64) = (52.3086, 4.7639);
    const JFK: (f64, f64) = (40.6413, -73.7781);

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude is ~60 nm
        let dist = distance_nm(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 60.04).abs() < 0.1, "got {dist}");
    }

    #[test]
    fn test_distance_heathrow_schiphol() {
        let dist = distance_nm(LHR.0, LHR.1, AMS.0, AMS.1);
        assert!((dist - 200.0).abs() < 200.0 * 0.02, "got {dist}");
    }

    #[test]
    fn test_distance_same_point() {
        let dist = distance_nm(JFK.0, JFK.1, JFK.0, JFK.1);
        assert!(dist < 1e-6);
    }

    #[test]
    fn test_distance_symmetric_and_triangle() {
        let ab = distance_nm(LHR.0, LHR.1, JFK.0, JFK.1);
        let ba = distance_nm(JFK.0, JFK.1, LHR.0, LHR.1);
        assert!((ab - ba).abs() < 1e-9);

        let la = distance_nm(LHR.0, LHR.1, AMS.0, AMS.1);
        let aj = distance_nm(AMS.0, AMS.1, JFK.0, JFK.1);
        assert!(ab <= la + aj + 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        assert!(initial_bearing_deg(0.0, 0.0, 1.0, 0.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, -1.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, 0.0, -1.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_in_range() {
        let brg = initial_bearing_deg(LHR.0, LHR.1, JFK.0, JFK.1);
        assert!((0.0..360.0).contains(&brg));
        // Departs London heading north-west
        assert!(brg > 270.0 && brg < 300.0, "got {brg}");
    }

    #[test]
    fn test_tailwind_sign_convention() {
        // Wind from the west pushes an eastbound aircraft
        assert!((tailwind_component(270.0, 50.0, 90.0) - 50.0).abs() < 1e-9);
        // Wind from the east is a headwind for the same track
        assert!((tailwind_component(90.0, 50.0, 90.0) + 50.0).abs() < 1e-9);
        // Pure crosswind contributes nothing
        assert!(tailwind_component(0.0, 50.0, 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_endpoints() {
        let (lat0, lon0) = interpolate_great_circle(LHR.0, LHR.1, JFK.0, JFK.1, 0.0);
        assert!((lat0 - LHR.0).abs() < 1e-9 && (lon0 - LHR.1).abs() < 1e-9);

        let (lat1, lon1) = interpolate_great_circle(LHR.0, LHR.1, JFK.0, JFK.1, 1.0);
        assert!((lat1 - JFK.0).abs() < 1e-9 && (lon1 - JFK.1).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_midpoint_is_equidistant() {
        let (lat, lon) = interpolate_great_circle(LHR.0, LHR.1, JFK.0, JFK.1, 0.5);
        let d1 = distance_nm(LHR.0, LHR.1, lat, lon);
        let d2 = distance_nm(lat, lon, JFK.0, JFK.1);
        assert!((d1 - d2).abs() < 0.01, "{d1} vs {d2}");
        // Great-circle arc bends north of both endpoints
        assert!(lat > LHR.0);
    }

    #[test]
    fn test_interpolation_coincident_points() {
        let (lat, lon) = interpolate_great_circle(10.0, 20.0, 10.0, 20.0, 0.7);
        assert_eq!((lat, lon), (10.0, 20.0));
    }

    #[test]
    fn test_tas_from_cas() {
        assert!((tas_from_cas(485.0, 0.0, 0.0) - 485.0).abs() < 1e-9);
        let tas = tas_from_cas(485.0, 41_000.0, 0.0);
        assert!((tas - 485.0 * 1.82).abs() < 1e-9);
        let warm = tas_from_cas(485.0, 41_000.0, 15.0);
        assert!((warm - tas * 1.02).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_deg() {
        assert_eq!(normalize_deg(360.0), 0.0);
        assert!((normalize_deg(-90.0) - 270.0).abs() < 1e-12);
        assert!((normalize_deg(725.0) - 5.0).abs() < 1e-12);
    }
}
