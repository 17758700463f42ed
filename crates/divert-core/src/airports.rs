//! Airport reference coordinates.

use crate::models::Waypoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA code
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    pub fn new(code: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            lat,
            lon,
        }
    }

    /// The airport as an unplaced waypoint named by its code.
    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.code.clone(), self.lat, self.lon)
    }
}

const STANDARD_AIRPORTS: &[(&str, &str, f64, f64)] = &[
    // North America
    ("JFK", "New York John F. Kennedy", 40.6413, -73.7781),
    ("BOS", "Boston Logan", 42.3656, -71.0096),
    ("YHZ", "Halifax Stanfield", 44.8808, -63.5086),
    ("YQX", "Gander", 48.9369, -54.5681),
    ("YYT", "St. John's", 47.6186, -52.7519),
    // North Atlantic
    ("KEF", "Keflavik", 63.9850, -22.6056),
    ("TER", "Lajes", 38.7618, -27.0908),
    ("PDL", "Ponta Delgada", 37.7412, -25.6979),
    // Europe
    ("LHR", "London Heathrow", 51.4775, -0.4614),
    ("SNN", "Shannon", 52.7020, -8.9248),
    ("DUB", "Dublin", 53.4264, -6.2499),
    ("CDG", "Paris Charles de Gaulle", 49.0097, 2.5479),
    ("AMS", "Amsterdam Schiphol", 52.3086, 4.7639),
    ("FRA", "Frankfurt", 50.0379, 8.5622),
    ("MUC", "Munich", 48.3538, 11.7861),
    ("VIE", "Vienna", 48.1103, 16.5697),
    ("MAD", "Madrid Barajas", 40.4983, -3.5676),
    ("LIS", "Lisbon", 38.7742, -9.1342),
    ("FCO", "Rome Fiumicino", 41.8003, 12.2389),
    ("ATH", "Athens", 37.9364, 23.9445),
    ("IST", "Istanbul", 41.2753, 28.7519),
    ("LCA", "Larnaca", 34.8751, 33.6249),
    // Middle East
    ("CAI", "Cairo", 30.1219, 31.4056),
    ("KWI", "Kuwait", 29.2266, 47.9689),
    ("BAH", "Bahrain", 26.2708, 50.6336),
    ("DOH", "Doha Hamad", 25.2731, 51.6081),
    ("AUH", "Abu Dhabi", 24.4330, 54.6511),
    ("DXB", "Dubai", 25.2532, 55.3657),
    ("MCT", "Muscat", 23.5933, 58.2844),
    // Indian subcontinent
    ("KHI", "Karachi", 24.9065, 67.1608),
    ("DEL", "Delhi Indira Gandhi", 28.5562, 77.1000),
    ("BOM", "Mumbai", 19.0896, 72.8656),
    ("CMB", "Colombo", 7.1808, 79.8841),
    // Asia Pacific
    ("BKK", "Bangkok Suvarnabhumi", 13.6900, 100.7501),
    ("SIN", "Singapore Changi", 1.3644, 103.9915),
    ("HKG", "Hong Kong", 22.3080, 113.9185),
    ("DRW", "Darwin", -12.4147, 130.8767),
    ("PER", "Perth", -31.9385, 115.9672),
    ("SYD", "Sydney Kingsford Smith", -33.9399, 151.1753),
    // South Atlantic / South America
    ("SID", "Sal Amilcar Cabral", 16.7414, -22.9494),
    ("DSS", "Dakar Blaise Diagne", 14.6700, -17.0733),
    ("REC", "Recife", -8.1264, -34.9228),
    ("SSA", "Salvador", -12.9086, -38.3225),
    ("GIG", "Rio de Janeiro Galeao", -22.8090, -43.2506),
    ("GRU", "Sao Paulo Guarulhos", -23.4356, -46.4731),
    ("EZE", "Buenos Aires Ezeiza", -34.8222, -58.5358),
    // Africa
    ("KRT", "Khartoum", 15.5895, 32.5532),
    ("ADD", "Addis Ababa", 8.9779, 38.7993),
    ("LOS", "Lagos", 6.5774, 3.3212),
    ("ACC", "Accra", 5.6052, -0.1668),
    ("NBO", "Nairobi", -1.3192, 36.9278),
    ("LUN", "Lusaka", -15.3308, 28.4526),
    ("WDH", "Windhoek", -22.4799, 17.4709),
    ("JNB", "Johannesburg", -26.1392, 28.2460),
];

/// Read-only lookup of airports by IATA code.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalogue {
    airports: HashMap<String, Airport>,
}

impl AirportCatalogue {
    /// Catalogue of every airport used by the built-in routes and regional alternates.
    pub fn standard() -> Self {
        STANDARD_AIRPORTS
            .iter()
            .map(|&(code, name, lat, lon)| Airport::new(code, name, lat, lon))
            .collect()
    }

    pub fn insert(&mut self, airport: Airport) {
        self.airports.insert(airport.code.clone(), airport);
    }

    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn waypoint(&self, code: &str) -> Option<Waypoint> {
        self.get(code).map(Airport::waypoint)
    }

    /// Waypoints for the given codes, in order. Uncatalogued codes are skipped.
    pub fn waypoints(&self, codes: &[&str]) -> Vec<Waypoint> {
        codes
            .iter()
            .filter_map(|code| {
                let waypoint = self.waypoint(code);
                if waypoint.is_none() {
                    tracing::debug!("Skipping uncatalogued airport {}", code);
                }
                waypoint
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl FromIterator<Airport> for AirportCatalogue {
    fn from_iter<I: IntoIterator<Item = Airport>>(iter: I) -> Self {
        let mut catalogue = Self::default();
        for airport in iter {
            catalogue.insert(airport);
        }
        catalogue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalogue_lookup() {
        let catalogue = AirportCatalogue::standard();
        assert_eq!(catalogue.len(), STANDARD_AIRPORTS.len());
        let lhr = catalogue.get("LHR").unwrap();
        assert_eq!(lhr.lat, 51.4775);
        assert!(catalogue.get("lhr").is_none());
    }

    #[test]
    fn test_waypoints_skip_unknown_codes() {
        let catalogue = AirportCatalogue::standard();
        let wps = catalogue.waypoints(&["JFK", "XXX", "BOS"]);
        let names: Vec<_> = wps.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["JFK", "BOS"]);
        assert!(wps.iter().all(|w| w.cumulative_nm.is_none()));
    }

    #[test]
    fn test_all_coordinates_valid() {
        let catalogue = AirportCatalogue::standard();
        for (code, ..) in STANDARD_AIRPORTS {
            assert!(catalogue.waypoint(code).unwrap().has_valid_coordinates(), "{code}");
        }
    }
}
