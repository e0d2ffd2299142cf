//! Standardized API response types (RFC 7807 compliant for errors).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// RFC 7807 Problem Details, extended with an RPC error code.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// Machine-readable procedure error code, e.g. `TOO_MANY_REQUESTS`.
    pub code: String,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Validation messages keyed by input field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            code: code.into(),
            detail: None,
            field_errors: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_field_errors(mut self, field: impl Into<String>, messages: Vec<String>) -> Self {
        self.field_errors
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), messages);
        self
    }

    /// First validation message for `field`, if any.
    pub fn first_field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .as_ref()?
            .get(field)?
            .first()
            .map(String::as_str)
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", "BAD_REQUEST").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized", "UNAUTHORIZED")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found", "NOT_FOUND").with_detail(detail)
    }

    pub fn too_many_requests(detail: impl Into<String>) -> Self {
        Self::new(429, "Too Many Requests", "TOO_MANY_REQUESTS").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error", "INTERNAL_SERVER_ERROR")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_serialize_camel_case() {
        let error = ErrorResponse::bad_request("Invalid input")
            .with_field_errors("content", vec!["Only emojis are allowed.".to_string()]);

        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["fieldErrors"]["content"][0], "Only emojis are allowed.");
        assert_eq!(error.first_field_error("content"), Some("Only emojis are allowed."));
    }

    #[test]
    fn test_wire_shapes_carry_only_populated_fields() {
        let ok = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true, "data": 1 }));

        let error = serde_json::to_value(ErrorResponse::bad_request("Invalid input")).unwrap();
        let keys: Vec<&str> = error.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        assert!(!keys.contains(&"requestId"));
        assert!(!keys.contains(&"fieldErrors"));
    }
}
