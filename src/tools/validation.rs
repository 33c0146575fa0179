//! Validate tool call arguments against a declared JSON Schema.

/// Validate arguments against a tool's JSON Schema.
///
/// Performs top-level validation: schema type check, required field
/// presence, and property type verification. Returns `Ok(())` when valid,
/// `Err(message)` listing every violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    let mut violations: Vec<String> = Vec::new();

    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        if schema_type == "object" && !args.is_object() {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(args)
            ));
        }
    }

    let obj = match args.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !obj.contains_key(field) {
                violations.push(format!("missing required field '{field}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in obj {
            let Some(prop_schema) = properties.get(key) else {
                continue;
            };
            if let Some(expected) = prop_schema.get("type").and_then(|v| v.as_str()) {
                if !value_matches_type(value, expected) {
                    violations.push(format!(
                        "field '{}' expected type '{}', got {}",
                        key,
                        expected,
                        json_type_name(value)
                    ));
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join("; "))
    }
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_args_when_schema_expects_object() {
        let schema = json!({ "type": "object", "properties": {}, "required": [] });
        let result = validate_arguments(&json!(42), &schema);
        assert!(result.unwrap_err().contains("expected object"));
    }

    #[test]
    fn reports_every_missing_required_field() {
        let schema = json!({
            "type": "object",
            "properties": {
                "symbol": { "type": "string" },
                "quantity": { "type": "integer" },
            },
            "required": ["symbol", "quantity"],
        });
        let err = validate_arguments(&json!({}), &schema).unwrap_err();
        assert!(err.contains("missing required field 'symbol'"));
        assert!(err.contains("missing required field 'quantity'"));
    }

    #[test]
    fn reports_type_mismatch_with_both_types() {
        let schema = json!({
            "type": "object",
            "properties": { "quantity": { "type": "integer" } },
            "required": ["quantity"],
        });
        let err = validate_arguments(&json!({ "quantity": "ten" }), &schema).unwrap_err();
        assert!(err.contains("field 'quantity'"));
        assert!(err.contains("expected type 'integer'"));
        assert!(err.contains("got string"));
    }

    #[test]
    fn accepts_valid_args() {
        let schema = json!({
            "type": "object",
            "properties": {
                "symbol": { "type": "string" },
                "verbose": { "type": "boolean" },
            },
            "required": ["symbol"],
        });
        assert!(validate_arguments(&json!({ "symbol": "AAPL" }), &schema).is_ok());
        assert!(
            validate_arguments(&json!({ "symbol": "AAPL", "verbose": true }), &schema).is_ok()
        );
    }

    #[test]
    fn accepts_extra_fields_not_in_schema() {
        let schema = json!({
            "type": "object",
            "properties": { "symbol": { "type": "string" } },
            "required": ["symbol"],
        });
        assert!(
            validate_arguments(&json!({ "symbol": "AAPL", "exchange": "NYSE" }), &schema).is_ok()
        );
    }

    #[test]
    fn accepts_anything_under_empty_schema() {
        let schema = json!({});
        assert!(validate_arguments(&json!({ "whatever": [1, 2] }), &schema).is_ok());
        assert!(validate_arguments(&serde_json::Value::Null, &schema).is_ok());
    }

    #[test]
    fn number_accepts_integers_but_integer_rejects_floats() {
        let schema = json!({
            "type": "object",
            "properties": {
                "price": { "type": "number" },
                "count": { "type": "integer" },
            },
            "required": [],
        });
        assert!(validate_arguments(&json!({ "price": 3 }), &schema).is_ok());
        assert!(validate_arguments(&json!({ "count": 3.5 }), &schema).is_err());
    }
}
