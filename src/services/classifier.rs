/// Risk level classification and advisory text
use super::scoring;
use crate::domain::{RiskAssessment, RiskLevel, Sensitivity, WeatherSnapshot};

/// Map a 0-100 score onto a severity band
pub fn classify(risk_score: u8) -> RiskLevel {
    match risk_score {
        75.. => RiskLevel::Critical,
        50..=74 => RiskLevel::High,
        25..=49 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}

/// Fixed advice for each severity band
pub fn recommend(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => {
            "Very high migraine risk. Take preventive medication now if prescribed, \
             stay hydrated and avoid known triggers over the next 4-8 hours."
        }
        RiskLevel::High => {
            "High migraine risk. Have your medication ready and monitor for early symptoms."
        }
        RiskLevel::Medium => {
            "Moderate migraine risk. Stay hydrated, avoid known triggers \
             and keep medication nearby."
        }
        RiskLevel::Low => "Low migraine risk. Continue your normal activities.",
    }
}

/// Score, classify and attach advice in one step
pub fn assess(
    weather: &WeatherSnapshot,
    previous_pressure: Option<f64>,
    sensitivity: Sensitivity,
) -> RiskAssessment {
    let (risk_score, triggers) = scoring::score(weather, previous_pressure, sensitivity);
    let risk_level = classify(risk_score);

    RiskAssessment {
        risk_score,
        triggers,
        risk_level,
        recommendation: recommend(risk_level).to_string(),
    }
}
