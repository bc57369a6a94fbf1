//! Weighted-factor migraine risk scoring.
//!
//! Each factor that fires contributes its base weight times the
//! sensitivity multiplier. The sum is capped at 100 and rounded. Trigger
//! texts are collected in factor order; the "elevated" humidity and
//! temperature bands add weight without a trigger.

use crate::domain::{Sensitivity, WeatherSnapshot};

const SHARP_PRESSURE_SWING_HPA: f64 = 8.0;
const MODERATE_PRESSURE_SWING_HPA: f64 = 4.0;
const LOW_PRESSURE_HPA: f64 = 1005.0;

const STORM_CONDITIONS: [&str; 4] = ["Thunderstorm", "Storm", "Rain", "Drizzle"];

/// Upper bound of the risk scale
pub const MAX_RISK_SCORE: u8 = 100;

/// Score a snapshot. Pressure swings only count when there was a
/// previous reading to compare against.
pub fn score(
    weather: &WeatherSnapshot,
    previous_pressure: Option<f64>,
    sensitivity: Sensitivity,
) -> (u8, Vec<String>) {
    let m = sensitivity.multiplier();
    let mut total = 0.0;
    let mut triggers = Vec::new();

    if previous_pressure.is_some() {
        let swing = weather.pressure_change.abs();
        if swing >= SHARP_PRESSURE_SWING_HPA {
            total += 35.0 * m;
            triggers.push(format!(
                "Significant pressure change: {:.1} hPa",
                weather.pressure_change
            ));
        } else if swing >= MODERATE_PRESSURE_SWING_HPA {
            total += 20.0 * m;
            triggers.push(format!(
                "Moderate pressure change: {:.1} hPa",
                weather.pressure_change
            ));
        }
    }

    if weather.pressure < LOW_PRESSURE_HPA {
        total += 25.0 * m;
        triggers.push(format!("Low pressure system: {:.1} hPa", weather.pressure));
    }

    if weather.humidity > 80.0 {
        total += 15.0 * m;
        triggers.push(format!("High humidity: {:.0}%", weather.humidity));
    } else if weather.humidity > 70.0 {
        total += 8.0 * m;
    }

    let t = weather.temperature;
    if t > 32.0 || t < 0.0 {
        total += 15.0 * m;
        triggers.push(format!("Extreme temperature: {:.1}°C", t));
    } else if t > 28.0 || t < 5.0 {
        total += 8.0 * m;
    }

    if STORM_CONDITIONS
        .iter()
        .any(|c| weather.conditions.contains(c))
    {
        total += 20.0 * m;
        triggers.push(format!("Storm activity: {}", weather.conditions));
    }

    if weather.uv_index > 8 {
        total += 10.0 * m;
        triggers.push(format!("High UV index: {}", weather.uv_index));
    }

    if weather.wind_speed > 40.0 {
        total += 10.0 * m;
        triggers.push(format!("Strong winds: {:.0} km/h", weather.wind_speed));
    }

    let risk_score = total.clamp(0.0, f64::from(MAX_RISK_SCORE)).round() as u8;
    (risk_score, triggers)
}
