/// Application configuration module
use crate::domain::Coordinates;
use anyhow::Context;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub user_id: String,
    pub bind_addr: String,
    pub weather: WeatherConfig,
    pub monitoring: MonitoringConfig,
    pub location: LocationConfig,
    pub notify_webhook_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct WeatherConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// Substitute synthetic readings when the provider is unreachable
    pub synthetic_fallback: bool,
}

#[derive(Clone, Debug)]
pub struct MonitoringConfig {
    pub check_interval: Duration,
}

#[derive(Clone, Debug)]
pub struct LocationConfig {
    pub fallback: Coordinates,
    pub device: Option<Coordinates>,
    pub lookup_timeout: Duration,
    pub cache_max_age: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fallback: Coordinates::new(40.7128, -74.0060),
            device: None,
            lookup_timeout: Duration::from_millis(5000),
            cache_max_age: Duration::from_secs(300),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is required")?;
        let user_id = env::var("USER_ID").context("USER_ID is required")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let weather = WeatherConfig {
            api_url: env::var("WEATHER_API_URL").unwrap_or_else(|_| {
                "http://localhost:54321/functions/v1/get-weather".to_string()
            }),
            api_key: env::var("WEATHER_API_KEY").ok().filter(|s| !s.is_empty()),
            synthetic_fallback: env_bool("WEATHER_SYNTHETIC_FALLBACK", true),
        };

        let monitoring = MonitoringConfig {
            check_interval: Duration::from_secs(env_u64("CHECK_INTERVAL_SECONDS", 1800)),
        };

        let defaults = LocationConfig::default();
        let location = LocationConfig {
            fallback: Coordinates::new(
                env_f64("FALLBACK_LAT", defaults.fallback.lat),
                env_f64("FALLBACK_LNG", defaults.fallback.lng),
            ),
            device: match (env_opt_f64("DEVICE_LAT"), env_opt_f64("DEVICE_LNG")) {
                (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
                _ => None,
            },
            lookup_timeout: Duration::from_millis(env_u64("GEOLOCATION_TIMEOUT_MS", 5000)),
            cache_max_age: Duration::from_secs(env_u64("GEOLOCATION_CACHE_SECONDS", 300)),
        };

        let notify_webhook_url = env::var("NOTIFY_WEBHOOK_URL").ok().filter(|s| !s.is_empty());

        Ok(Self {
            database_url,
            user_id,
            bind_addr,
            weather,
            monitoring,
            location,
            notify_webhook_url,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    env_opt_f64(key).unwrap_or(default)
}

fn env_opt_f64(key: &str) -> Option<f64> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key).ok().as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}
