//! The `{ success, message, data }` wrapper every response carries.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Message used when the server gives none.
const FALLBACK_MESSAGE: &str = "An error occurred";

/// Unwrap a response body received with `status`.
///
/// Non-2xx statuses and `success: false` both become [`ApiError::Server`]
/// carrying the envelope's message. Returns `Ok(None)` for a successful
/// envelope without data (e.g. after a delete).
pub fn unwrap_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    let is_success = (200..300).contains(&status);

    if !is_success {
        // Error bodies are usually `ApiResponse<Void>`; fall back to the raw text
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback_message(body));
        return Err(ApiError::Server { status, message });
    }

    let envelope: ApiResponse<T> = serde_json::from_str(body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })?;

    if !envelope.success {
        return Err(ApiError::Server {
            status,
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        });
    }

    Ok(envelope.data)
}

/// Unwrap a body whose `data` must be present.
pub fn unwrap_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    unwrap_body(status, body)?.ok_or_else(|| ApiError::Decode {
        message: "response envelope has no data".to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

fn fallback_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Page;
    use crate::domain::Location;

    #[test]
    fn success_with_data() {
        let body = r#"{"success":true,"message":"ok","data":[1,2,3]}"#;
        let data: Vec<u32> = unwrap_data(200, body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn success_without_data() {
        let body = r#"{"success":true,"message":"deleted","data":null}"#;
        let data: Option<u32> = unwrap_body(200, body).unwrap();
        assert!(data.is_none());

        let result: Result<u32, _> = unwrap_data(200, body);
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[test]
    fn missing_data_field_for_record_type() {
        let body = r#"{"success":true,"message":"deleted"}"#;
        let data: Option<Location> = unwrap_body(200, body).unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn page_with_unusual_stored_code_decodes() {
        let body = r#"{"success":true,"message":"ok","data":{
            "content": [
                {"id":1,"name":"Istanbul Airport","country":"TR","city":"Istanbul","locationCode":"IST"},
                {"id":2,"name":"Istanbul Annex","country":"TR","city":"Istanbul","locationCode":"ist-2"},
                {"id":3,"name":"Long Code","country":"GB","city":"London","locationCode":"LONGCODE123"}
            ],
            "number":0,"size":10,"totalElements":3,"totalPages":1,
            "first":true,"last":true,"empty":false
        }}"#;
        let page: Page<Location> = unwrap_data(200, body).unwrap();
        let codes: Vec<&str> = page.content.iter().map(|l| l.location_code.as_str()).collect();
        assert_eq!(codes, vec!["IST", "ist-2", "LONGCODE123"]);
    }

    #[test]
    fn success_false_is_server_error() {
        let body = r#"{"success":false,"message":"Invalid originLocationCode: XXX","data":null}"#;
        let result: Result<Vec<u32>, _> = unwrap_data(200, body);
        match result {
            Err(ApiError::Server { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Invalid originLocationCode: XXX");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn non_2xx_uses_envelope_message() {
        let body = r#"{"success":false,"message":"Location not found with id: 9"}"#;
        let result: Result<u32, _> = unwrap_data(404, body);
        match result {
            Err(ApiError::Server { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Location not found with id: 9");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn non_2xx_without_envelope() {
        let result: Result<u32, _> = unwrap_data(502, "Bad Gateway");
        assert_eq!(result.unwrap_err().user_message(), "Bad Gateway");

        let result: Result<u32, _> = unwrap_data(500, "");
        assert_eq!(result.unwrap_err().user_message(), "An error occurred");
    }

    #[test]
    fn malformed_success_body() {
        let result: Result<u32, _> = unwrap_data(200, "<html></html>");
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }
}
