use serde_json::Value;

/// Key figures in priority order: the first one present is printed.
const PRIORITY_KEYS: [&str; 5] = [
    "roi_percent",
    "yield_percent",
    "cash_left_in",
    "matched_count",
    "stamp_duty",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Portfolio results keep their headline numbers under "summary".
    let lookup = result_obj
        .get("summary")
        .filter(|s| s.is_object())
        .unwrap_or(result_obj);

    if let Value::Object(map) = lookup {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deal_prints_roi() {
        let v = json!({"result": {"yield_percent": "7.2", "roi_percent": "0"}});
        assert_eq!(minimal_line(&v), "0");
    }

    #[test]
    fn test_portfolio_prints_matched_count() {
        let v = json!({"result": {"records": [], "summary": {"deal_count": 4, "matched_count": 2}}});
        assert_eq!(minimal_line(&v), "2");
    }
}
