//! Regional narrowing of candidate alternates.
//!
//! Routes are classified into a region by an explicit route-key table, then a
//! small latitude/longitude decision tree picks the alternates that make
//! geographic sense for the aircraft's current position.

use crate::airports::AirportCatalogue;
use crate::models::Waypoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthAtlantic,
    IndianSubcontinent,
    AsiaPacific,
    MiddleEast,
    SouthAmerica,
    Africa,
    #[default]
    European,
}

/// Route keys (`"ORIGIN-DEST"`) with a known region. Matched case-sensitively
/// in both directions; anything else is European.
const REGION_TABLE: &[(&str, Region)] = &[
    ("LHR-JFK", Region::NorthAtlantic),
    ("LHR-BOS", Region::NorthAtlantic),
    ("CDG-JFK", Region::NorthAtlantic),
    ("AMS-JFK", Region::NorthAtlantic),
    ("FRA-JFK", Region::NorthAtlantic),
    ("DUB-BOS", Region::NorthAtlantic),
    ("LHR-DEL", Region::IndianSubcontinent),
    ("LHR-BOM", Region::IndianSubcontinent),
    ("LHR-KHI", Region::IndianSubcontinent),
    ("FRA-DEL", Region::IndianSubcontinent),
    ("LHR-SIN", Region::AsiaPacific),
    ("LHR-HKG", Region::AsiaPacific),
    ("LHR-BKK", Region::AsiaPacific),
    ("LHR-SYD", Region::AsiaPacific),
    ("FRA-SIN", Region::AsiaPacific),
    ("SIN-SYD", Region::AsiaPacific),
    ("LHR-DXB", Region::MiddleEast),
    ("LHR-DOH", Region::MiddleEast),
    ("LHR-AUH", Region::MiddleEast),
    ("CDG-DXB", Region::MiddleEast),
    ("FRA-DXB", Region::MiddleEast),
    ("LHR-GRU", Region::SouthAmerica),
    ("LHR-EZE", Region::SouthAmerica),
    ("MAD-GRU", Region::SouthAmerica),
    ("MAD-EZE", Region::SouthAmerica),
    ("LIS-GRU", Region::SouthAmerica),
    ("LHR-JNB", Region::Africa),
    ("LHR-NBO", Region::Africa),
    ("LHR-LOS", Region::Africa),
    ("CDG-JNB", Region::Africa),
    ("FRA-JNB", Region::Africa),
];

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::NorthAtlantic => "north_atlantic",
            Region::IndianSubcontinent => "indian_subcontinent",
            Region::AsiaPacific => "asia_pacific",
            Region::MiddleEast => "middle_east",
            Region::SouthAmerica => "south_america",
            Region::Africa => "africa",
            Region::European => "european",
        }
    }

    /// Region of a route, checking the forward key then the reverse key.
    pub fn classify(origin: &str, destination: &str) -> Region {
        let forward = format!("{origin}-{destination}");
        let reverse = format!("{destination}-{origin}");
        let region = lookup(&forward)
            .or_else(|| lookup(&reverse))
            .unwrap_or_default();
        tracing::debug!("Route {} classified as {}", forward, region);
        region
    }

    /// Alternate airport codes for an aircraft at (lat, lon) in this region.
    pub fn candidate_codes(self, lat: f64, lon: f64) -> &'static [&'static str] {
        match self {
            Region::NorthAtlantic => {
                if lon < -30.0 {
                    &["YQX", "YYT", "YHZ", "BOS", "JFK"]
                } else if lon > -10.0 {
                    &["SNN", "DUB", "LHR", "CDG", "AMS"]
                } else {
                    &["KEF", "TER", "PDL", "SNN"]
                }
            }
            Region::IndianSubcontinent => {
                if lon < 20.0 {
                    &["FRA", "MUC", "VIE", "IST"]
                } else if lon < 55.0 {
                    &["IST", "KWI", "BAH", "DOH", "DXB"]
                } else {
                    &["MCT", "KHI", "DEL", "BOM"]
                }
            }
            Region::AsiaPacific => {
                if lon < 20.0 {
                    &["FRA", "MUC", "VIE"]
                } else if lon < 60.0 {
                    &["IST", "DOH", "AUH", "DXB"]
                } else if lon < 95.0 {
                    &["MCT", "BOM", "DEL", "CMB"]
                } else if lat >= -5.0 {
                    &["BKK", "SIN", "HKG"]
                } else {
                    &["DRW", "PER", "SYD"]
                }
            }
            Region::MiddleEast => {
                if lon < 20.0 {
                    &["FRA", "MUC", "VIE", "FCO"]
                } else if lon < 40.0 {
                    &["ATH", "IST", "LCA", "CAI"]
                } else {
                    &["KWI", "BAH", "DOH", "DXB", "AUH"]
                }
            }
            Region::SouthAmerica => {
                if lat > 30.0 {
                    &["LIS", "MAD", "TER"]
                } else if lat > 0.0 {
                    &["SID", "DSS"]
                } else if lat > -15.0 {
                    &["REC", "SSA"]
                } else {
                    &["GIG", "GRU", "EZE"]
                }
            }
            Region::Africa => {
                if lat > 30.0 {
                    &["MAD", "FCO", "ATH", "CAI"]
                } else if lat > 5.0 {
                    &["CAI", "KRT", "ADD", "LOS", "ACC"]
                } else if lat > -15.0 {
                    &["NBO", "ADD", "LUN"]
                } else {
                    &["LUN", "WDH", "JNB"]
                }
            }
            Region::European => &["LHR", "CDG", "AMS", "FRA", "MUC", "MAD", "FCO", "DUB"],
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lookup(route_key: &str) -> Option<Region> {
    REGION_TABLE
        .iter()
        .find(|(key, _)| *key == route_key)
        .map(|&(_, region)| region)
}

/// Candidate alternates for a flight on `origin`-`destination` currently at (lat, lon).
pub fn regional_candidates(
    origin: &str,
    destination: &str,
    lat: f64,
    lon: f64,
    airports: &AirportCatalogue,
) -> (Region, Vec<Waypoint>) {
    let region = Region::classify(origin, destination);
    let candidates = airports.waypoints(region.candidate_codes(lat, lon));
    (region, candidates)
}
