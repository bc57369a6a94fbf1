use super::{HttpClient, WeatherProvider};
use crate::domain::{Conditions, Coordinates};
use crate::errors::WeatherError;
use crate::utils::num_pick;
use async_trait::async_trait;
use serde_json::Value;

/// Client for the weather edge function
pub struct WeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            api_key,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_conditions(&self, at: Coordinates) -> Result<Conditions, WeatherError> {
        let mut req = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[("lat", at.lat), ("lng", at.lng)]);

        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(WeatherError::Status(resp.status().as_u16()));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| WeatherError::Decode(e.to_string()))?;

        parse_conditions(&json)
    }
}

/// Read the provider's metric payload. Numbers may arrive as strings;
/// a missing UV index reads as 0.
pub fn parse_conditions(json: &Value) -> Result<Conditions, WeatherError> {
    let temperature = required(json, &["temperature", "temp"])?;
    let humidity = required(json, &["humidity"])?;
    let pressure = required(json, &["pressure"])?;
    let wind_speed = required(json, &["windSpeed", "wind_speed"])?;
    let uv_index = num_pick(json, &["uvIndex", "uv_index"])
        .map(|uv| uv.max(0.0).round() as u32)
        .unwrap_or(0);
    let conditions = json
        .get("conditions")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| WeatherError::Decode("missing conditions".to_string()))?
        .to_string();

    Ok(Conditions {
        temperature,
        humidity,
        pressure,
        conditions,
        uv_index,
        wind_speed,
    })
}

fn required(json: &Value, keys: &[&str]) -> Result<f64, WeatherError> {
    num_pick(json, keys).ok_or_else(|| WeatherError::Decode(format!("missing {}", keys[0])))
}
