use serde_json::Value;

// Masked whole; no prefix or suffix of a secret is kept.
const MASK: &str = "****";

/// Masks credentials in JSON payloads before they are logged
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sanitized = serde_json::Map::new();
            for (key, val) in map {
                let sanitized_val = if is_sensitive_field(key) {
                    Value::String(MASK.to_string())
                } else {
                    sanitize_json(val)
                };
                sanitized.insert(key.clone(), sanitized_val);
            }
            Value::Object(sanitized)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sanitize_json).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_field(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "partnerpassword" | "sig" | "password" | "secret" | "token" | "authorization"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_credentials() {
        let input = json!({
            "partnerkey": "FAKEGOOGLE",
            "partnerpassword": "RkFLRVBBU1NXT1JEMTIzNA==",
            "sig": "adn2eTMNceldt3WB/rl/V8wVrXS8Fuc1y5U9DSicRjE=",
            "totalamount": 1000
        });

        let sanitized = sanitize_json(&input);

        assert_eq!(sanitized["partnerpassword"], "****");
        assert_eq!(sanitized["sig"], "****");
        assert_eq!(sanitized["partnerkey"], "FAKEGOOGLE");
        assert_eq!(sanitized["totalamount"], 1000);
    }

    #[test]
    fn test_sanitize_nested() {
        let input = json!({
            "items": [
                { "partneritemref": "i-1", "secret": "hidden" }
            ]
        });

        let sanitized = sanitize_json(&input);
        assert_eq!(sanitized["items"][0]["secret"], "****");
        assert_eq!(sanitized["items"][0]["partneritemref"], "i-1");
    }
}
