//! Runtime selection of the weather source.

use divert_core::{
    CalmWeather, JitteredWeather, SyntheticWeather, WeatherSample, WeatherSource,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Calm,
    Synthetic,
    Jitter,
}

impl FromStr for WeatherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calm" => Ok(WeatherKind::Calm),
            "synthetic" => Ok(WeatherKind::Synthetic),
            "jitter" | "jittered" => Ok(WeatherKind::Jitter),
            other => Err(format!("unknown weather model: {other}")),
        }
    }
}

/// The weather source chosen at startup.
#[derive(Debug)]
pub enum WeatherModel {
    Calm(CalmWeather),
    Synthetic(SyntheticWeather),
    Jitter(JitteredWeather<SyntheticWeather>),
}

impl WeatherModel {
    pub fn new(kind: WeatherKind, seed: u64) -> Self {
        match kind {
            WeatherKind::Calm => WeatherModel::Calm(CalmWeather),
            WeatherKind::Synthetic => WeatherModel::Synthetic(SyntheticWeather::default()),
            WeatherKind::Jitter => {
                WeatherModel::Jitter(JitteredWeather::new(SyntheticWeather::default(), seed))
            }
        }
    }
}

impl WeatherSource for WeatherModel {
    fn sample(&self, lat: f64, lon: f64, altitude_ft: f64) -> WeatherSample {
        match self {
            WeatherModel::Calm(w) => w.sample(lat, lon, altitude_ft),
            WeatherModel::Synthetic(w) => w.sample(lat, lon, altitude_ft),
            WeatherModel::Jitter(w) => w.sample(lat, lon, altitude_ft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("calm".parse::<WeatherKind>(), Ok(WeatherKind::Calm));
        assert_eq!(" Synthetic ".parse::<WeatherKind>(), Ok(WeatherKind::Synthetic));
        assert_eq!("jittered".parse::<WeatherKind>(), Ok(WeatherKind::Jitter));
        assert!("fog".parse::<WeatherKind>().is_err());
    }

    #[test]
    fn test_calm_model_delegates() {
        let model = WeatherModel::new(WeatherKind::Calm, 0);
        assert_eq!(model.sample(50.0, -20.0, 41_000.0), WeatherSample::default());
    }
}
