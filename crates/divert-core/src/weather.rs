//! Weather sources consumed by the diversion evaluator.
//!
//! The evaluator only needs a synchronous `(lat, lon, altitude_ft) -> WeatherSample`
//! lookup. Live sources (METAR, gridded forecasts) should apply their own
//! timeout and caching before implementing [`WeatherSource`].

use crate::models::WeatherSample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Anything that can report wind and temperature at a position and altitude.
pub trait WeatherSource {
    fn sample(&self, lat: f64, lon: f64, altitude_ft: f64) -> WeatherSample;
}

impl<F> WeatherSource for F
where
    F: Fn(f64, f64, f64) -> WeatherSample,
{
    fn sample(&self, lat: f64, lon: f64, altitude_ft: f64) -> WeatherSample {
        self(lat, lon, altitude_ft)
    }
}

/// No wind, standard atmosphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalmWeather;

impl WeatherSource for CalmWeather {
    fn sample(&self, _lat: f64, _lon: f64, _altitude_ft: f64) -> WeatherSample {
        WeatherSample::default()
    }
}

/// Deterministic climatological model: a westerly jet centred on the
/// mid-latitudes, strengthening with altitude, with warmer-than-ISA
/// air in the tropics and colder air toward the poles.
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    /// Jet core speed at the reference altitude (knots)
    pub jet_core_kt: f64,
    /// Latitude of the jet core (degrees, applied to both hemispheres)
    pub jet_core_lat: f64,
    /// Half-width of the jet in degrees of latitude
    pub jet_width_deg: f64,
    /// Altitude at which the jet reaches its core speed (feet)
    pub reference_altitude_ft: f64,
    /// ISA deviation amplitude (°C)
    pub isa_amplitude_c: f64,
}

impl Default for SyntheticWeather {
    fn default() -> Self {
        Self {
            jet_core_kt: 120.0,
            jet_core_lat: 45.0,
            jet_width_deg: 15.0,
            reference_altitude_ft: 35_000.0,
            isa_amplitude_c: 10.0,
        }
    }
}

impl WeatherSource for SyntheticWeather {
    fn sample(&self, lat: f64, lon: f64, altitude_ft: f64) -> WeatherSample {
        let offset = (lat.abs() - self.jet_core_lat) / self.jet_width_deg.max(1e-6);
        let altitude_scale = (altitude_ft / self.reference_altitude_ft).clamp(0.0, 1.2);
        let wind_speed_kt = self.jet_core_kt * (-offset * offset).exp() * altitude_scale;

        // Meander the jet a little with longitude
        let wind_dir_deg = crate::spatial::normalize_deg(270.0 + 20.0 * lon.to_radians().sin());

        let isa_dev_c = self.isa_amplitude_c * lat.to_radians().cos() - self.isa_amplitude_c / 2.0;

        WeatherSample {
            wind_dir_deg,
            wind_speed_kt,
            isa_dev_c,
        }
    }
}

/// Adds bounded random perturbation to another source.
///
/// Seeded, so a given seed and call sequence always reproduce the same samples.
#[derive(Debug)]
pub struct JitteredWeather<W> {
    inner: W,
    rng: Mutex<StdRng>,
    pub max_dir_jitter_deg: f64,
    pub max_speed_jitter_kt: f64,
    pub max_isa_jitter_c: f64,
}

impl<W: WeatherSource> JitteredWeather<W> {
    pub fn new(inner: W, seed: u64) -> Self {
        Self {
            inner,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            max_dir_jitter_deg: 15.0,
            max_speed_jitter_kt: 20.0,
            max_isa_jitter_c: 3.0,
        }
    }
}

impl<W: WeatherSource> WeatherSource for JitteredWeather<W> {
    fn sample(&self, lat: f64, lon: f64, altitude_ft: f64) -> WeatherSample {
        let base = self.inner.sample(lat, lon, altitude_ft);
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let dir = base.wind_dir_deg + rng.random_range(-1.0_f64..=1.0) * self.max_dir_jitter_deg;
        let speed = base.wind_speed_kt + rng.random_range(-1.0_f64..=1.0) * self.max_speed_jitter_kt;
        let isa = base.isa_dev_c + rng.random_range(-1.0_f64..=1.0) * self.max_isa_jitter_c;

        WeatherSample {
            wind_dir_deg: crate::spatial::normalize_deg(dir),
            wind_speed_kt: speed.max(0.0),
            isa_dev_c: isa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_weather_is_zero() {
        let sample = CalmWeather.sample(51.0, -30.0, 41_000.0);
        assert_eq!(sample, WeatherSample::default());
    }

    #[test]
    fn test_closure_is_weather_source() {
        let fixed = |_lat: f64, _lon: f64, _alt: f64| WeatherSample {
            wind_dir_deg: 270.0,
            wind_speed_kt: 80.0,
            isa_dev_c: 5.0,
        };
        let sample = fixed.sample(0.0, 0.0, 0.0);
        assert_eq!(sample.wind_speed_kt, 80.0);
    }

    #[test]
    fn test_synthetic_jet_peaks_at_core_latitude() {
        let model = SyntheticWeather::default();
        let core = model.sample(45.0, 0.0, 35_000.0);
        let tropics = model.sample(5.0, 0.0, 35_000.0);
        let low = model.sample(45.0, 0.0, 5_000.0);

        assert!((core.wind_speed_kt - 120.0).abs() < 1e-9);
        assert!(tropics.wind_speed_kt < core.wind_speed_kt / 2.0);
        assert!(low.wind_speed_kt < core.wind_speed_kt);
        // Westerly at the prime meridian
        assert!((core.wind_dir_deg - 270.0).abs() < 1e-9);
        // Tropics run warm
        assert!(tropics.isa_dev_c > 0.0);
    }

    #[test]
    fn test_jitter_reproducible_per_seed() {
        let a = JitteredWeather::new(SyntheticWeather::default(), 7);
        let b = JitteredWeather::new(SyntheticWeather::default(), 7);
        for _ in 0..5 {
            assert_eq!(a.sample(50.0, -20.0, 39_000.0), b.sample(50.0, -20.0, 39_000.0));
        }
    }

    #[test]
    fn test_jitter_stays_bounded() {
        let jittered = JitteredWeather::new(CalmWeather, 99);
        for _ in 0..50 {
            let sample = jittered.sample(10.0, 10.0, 30_000.0);
            assert!((0.0..360.0).contains(&sample.wind_dir_deg));
            assert!((0.0..=20.0).contains(&sample.wind_speed_kt));
            assert!(sample.isa_dev_c.abs() <= 3.0);
        }
    }
}
