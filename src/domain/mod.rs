/// Domain models for the migraine risk pipeline
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Where a weather reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Live,
    Synthetic,
}

/// One normalized weather reading. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, 0-100
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    /// hPa delta from the previous reading, 0 without a baseline
    pub pressure_change: f64,
    pub conditions: String,
    pub uv_index: u32,
    /// km/h
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
    pub source: WeatherSource,
}

/// Raw conditions as reported by a weather provider, before the
/// pressure delta is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub conditions: String,
    pub uv_index: u32,
    pub wind_speed: f64,
}

impl Conditions {
    /// Attach the pressure delta against the previous reading.
    pub fn into_snapshot(
        self,
        previous_pressure: Option<f64>,
        source: WeatherSource,
    ) -> WeatherSnapshot {
        let pressure_change = previous_pressure
            .map(|prev| self.pressure - prev)
            .unwrap_or(0.0);

        WeatherSnapshot {
            temperature: self.temperature,
            humidity: self.humidity,
            pressure: self.pressure,
            pressure_change,
            conditions: self.conditions,
            uv_index: self.uv_index,
            wind_speed: self.wind_speed,
            timestamp: Utc::now(),
            source,
        }
    }
}

/// How strongly a user reacts to weather factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    /// Multiplier applied to every risk contribution
    pub fn multiplier(self) -> f64 {
        match self {
            Sensitivity::Low => 0.7,
            Sensitivity::Medium => 1.0,
            Sensitivity::High => 1.5,
        }
    }

    /// Parse a stored profile value; anything unknown is treated as medium.
    pub fn from_str_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Sensitivity::Low,
            "high" => Sensitivity::High,
            _ => Sensitivity::Medium,
        }
    }
}

/// Four-band severity derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one weather snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub triggers: Vec<String>,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

/// A risk assessment plus its weather context and acknowledgment state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub triggers: Vec<String>,
    pub recommendation: String,
    pub weather: WeatherSnapshot,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
}

impl Alert {
    pub fn new(assessment: RiskAssessment, weather: WeatherSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            risk_level: assessment.risk_level,
            risk_score: assessment.risk_score,
            triggers: assessment.triggers,
            recommendation: assessment.recommendation,
            weather,
            created_at: Utc::now(),
            acknowledged: false,
        }
    }
}

/// Profile fields the pipeline reads
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub weather_sensitivity: Sensitivity,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub weather_alerts_enabled: bool,
}

impl UserProfile {
    /// Stored coordinates, only when both halves are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

/// Fixed confidence attached to weather-only predictions
pub const PREDICTION_CONFIDENCE: f64 = 0.85;

/// How far ahead a prediction applies
pub const PREDICTION_HORIZON_HOURS: i64 = 8;

/// Append-only prediction row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub user_id: String,
    /// Risk on a 0-10 scale
    pub risk_level: i32,
    pub confidence: f64,
    pub weather_snapshot: WeatherSnapshot,
    pub triggers: Vec<String>,
    pub recommendation: String,
    pub predicted_for: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn from_alert(user_id: &str, alert: &Alert, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            risk_level: (f64::from(alert.risk_score) / 10.0).round() as i32,
            confidence: PREDICTION_CONFIDENCE,
            weather_snapshot: alert.weather.clone(),
            triggers: alert.triggers.clone(),
            recommendation: alert.recommendation.clone(),
            predicted_for: now + Duration::hours(PREDICTION_HORIZON_HOURS),
        }
    }
}

/// Payload handed to a notification sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Monitoring session check state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Idle,
    Checking,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Warning,
    Error,
}

/// A short user-facing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Everything the UI layer reads from a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub current_alert: Option<Alert>,
    pub weather_data: Option<WeatherSnapshot>,
    pub alerts: Vec<Alert>,
    pub is_loading: bool,
    pub is_monitoring: bool,
    pub status: CheckStatus,
    pub toasts: Vec<Toast>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
