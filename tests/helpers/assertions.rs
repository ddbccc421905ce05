// Envelope assertions
//
// Every endpoint except /health and a successful /test-db answers with
// {status, error_code, message, data, metadata}.

use serde_json::Value;

/// Assert a success envelope and return its `data`
pub fn assert_success(body: &Value) -> &Value {
    assert_eq!(body["status"], "success", "Expected success envelope, got: {}", body);
    assert!(
        body["error_code"].is_null(),
        "Success envelope must not carry an error_code: {}",
        body
    );
    assert!(body["message"].is_string(), "Missing message: {}", body);
    &body["data"]
}

/// Assert an error envelope with the given code
pub fn assert_error(body: &Value, error_code: &str) {
    assert_eq!(body["status"], "error", "Expected error envelope, got: {}", body);
    assert_eq!(body["error_code"], error_code, "Unexpected error_code in: {}", body);
    assert!(body["data"].is_null(), "Error envelope must not carry data: {}", body);
    assert!(body["message"].is_string(), "Missing message: {}", body);
}

/// Assert response body contains expected JSON field
pub fn assert_json_field(body: &Value, field: &str) {
    assert!(
        body.get(field).is_some(),
        "Expected JSON field '{}' not found in response: {}",
        field,
        body
    );
}

/// Assert a numeric JSON value equals `expected` within float tolerance
pub fn assert_f64(value: &Value, expected: f64) {
    let actual = value
        .as_f64()
        .unwrap_or_else(|| panic!("Expected a number, got: {}", value));
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected {}, got {}",
        expected,
        actual
    );
}
