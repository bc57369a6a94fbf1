/// Utility functions
use serde_json::Value;

/// Extract a finite number from a JSON value
pub fn num(v: &Value) -> Option<f64> {
    let x = match v.as_f64() {
        Some(x) => x,
        None => v.as_str()?.trim().parse::<f64>().ok()?,
    };
    Some(x).filter(|x| x.is_finite())
}

/// Pick the first numeric value found under any of the given keys
pub fn num_pick(v: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| v.get(*k).and_then(num))
}

/// Cut `s` to at most `max` characters, appending "..." when shortened
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_from_float() {
        let json = serde_json::json!(42.5);
        assert_eq!(num(&json), Some(42.5));
    }

    #[test]
    fn test_num_from_string() {
        let json = serde_json::json!("1013.2");
        assert_eq!(num(&json), Some(1013.2));
    }

    #[test]
    fn test_num_from_invalid() {
        let json = serde_json::json!("invalid");
        assert_eq!(num(&json), None);
    }

    #[test]
    fn test_num_rejects_non_finite_strings() {
        for s in ["NaN", "inf", "-inf", " infinity "] {
            assert_eq!(num(&serde_json::json!(s)), None, "{s}");
        }
    }

    #[test]
    fn test_num_pick_finds_second_key() {
        let json = serde_json::json!({"wind_speed": 12.0});
        assert_eq!(num_pick(&json, &["windSpeed", "wind_speed"]), Some(12.0));
    }

    #[test]
    fn test_num_pick_not_found() {
        let json = serde_json::json!({"other": 1});
        assert_eq!(num_pick(&json, &["uvIndex"]), None);
    }

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_chars("hydrate", 100), "hydrate");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("°C°C", 2), "°C...");
    }
}
