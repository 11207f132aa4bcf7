use serde_json::Value;

use super::scalar_text;

/// Result fields printed by `--output minimal`, in priority order.
const HEADLINE_KEYS: [&str; 4] = ["npv", "total_present_value", "present_value", "future_value"];

/// Print just the headline number of the result.
///
/// Sensitivity results have no single headline, so each rate is printed
/// on its own line as `rate npv`.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{line}");
    }
}

fn minimal_lines(value: &Value) -> Vec<String> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in HEADLINE_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return vec![scalar_text(val)];
                }
            }
        }

        if let Some(Value::Array(points)) = map.get("table") {
            return points
                .iter()
                .map(|p| format!("{} {}", scalar_text(&p["discount_rate"]), scalar_text(&p["npv"])))
                .collect();
        }

        if let Some((key, val)) = map.iter().next() {
            return vec![format!("{}: {}", key, scalar_text(val))];
        }
    }

    vec![scalar_text(result_obj)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headline_priority() {
        let value = json!({"result": {"future_value": "2", "present_value": "1"}});
        assert_eq!(minimal_lines(&value), vec!["1"]);
    }

    #[test]
    fn test_sensitivity_lines() {
        let value = json!({"result": {"table": [
            {"discount_rate": "0.05", "npv": "21.9"},
            {"discount_rate": "0.10", "npv": "7.1"}
        ]}});
        assert_eq!(minimal_lines(&value), vec!["0.05 21.9", "0.10 7.1"]);
    }
}
