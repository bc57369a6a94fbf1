//! Weather snapshot fetching with a synthetic fallback.

use crate::clients::WeatherProvider;
use crate::domain::{Conditions, Coordinates, WeatherSnapshot, WeatherSource};
use crate::errors::WeatherError;
use rand::Rng;
use std::sync::Arc;

const SYNTHETIC_CONDITIONS: [&str; 5] = ["Clear", "Clouds", "Rain", "Drizzle", "Thunderstorm"];

pub struct WeatherFetcher {
    provider: Arc<dyn WeatherProvider>,
    synthetic_fallback: bool,
}

impl WeatherFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>, synthetic_fallback: bool) -> Self {
        Self {
            provider,
            synthetic_fallback,
        }
    }

    /// Fetch conditions at `at` and attach the delta against
    /// `previous_pressure`. Transport failures fall back to a synthetic
    /// reading when enabled; malformed payloads always fail.
    pub async fn fetch(
        &self,
        at: Coordinates,
        previous_pressure: Option<f64>,
    ) -> Result<WeatherSnapshot, WeatherError> {
        match self.provider.current_conditions(at).await {
            Ok(conditions) => Ok(conditions.into_snapshot(previous_pressure, WeatherSource::Live)),
            Err(e) if self.synthetic_fallback && e.is_transient() => {
                tracing::warn!(error = %e, "weather provider unavailable, using synthetic reading");
                let conditions = synthesize(&mut rand::rng());
                Ok(conditions.into_snapshot(previous_pressure, WeatherSource::Synthetic))
            }
            Err(e) => Err(e),
        }
    }
}

/// Plausible random conditions within realistic physical ranges
pub fn synthesize<R: Rng>(rng: &mut R) -> Conditions {
    Conditions {
        temperature: rng.random_range(18.0..=28.0),
        humidity: rng.random_range(60.0..=90.0),
        pressure: rng.random_range(995.0..=1025.0),
        conditions: SYNTHETIC_CONDITIONS[rng.random_range(0..SYNTHETIC_CONDITIONS.len())]
            .to_string(),
        uv_index: rng.random_range(0..=10),
        wind_speed: rng.random_range(0.0..=50.0),
    }
}
