//! Status endpoint client and response classification.
//!
//! One GET per tracked identifier. The endpoint answers with a JSON document
//! describing the application; HTTP 400 with the `REQUEST_UID_NOT_VALID`
//! error code means the identifier itself is wrong and gets its own error
//! variant so the caller can tell the user instead of silently skipping.

use crate::error::{Result, WatchError};
use serde::Deserialize;

/// Fixed browser-like User-Agent attached to every outbound request.
///
/// The status service answers plain API clients inconsistently.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Error code the service returns for an unknown/malformed identifier.
const INVALID_UID_CODE: &str = "REQUEST_UID_NOT_VALID";

/// Wire shape of a successful status response.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    uid: String,
    #[serde(rename = "receptionDate")]
    reception_date: String,
    #[serde(rename = "passportStatus")]
    passport_status: PassportStatus,
    #[serde(rename = "internalStatus")]
    internal_status: InternalStatus,
}

#[derive(Debug, Deserialize)]
struct PassportStatus {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InternalStatus {
    name: String,
    percent: i32,
}

/// Flattened snapshot of one application's current status.
///
/// Transient: only `percent` outlives the run, via [`crate::PercentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Application uid as reported by the service.
    pub uid: String,
    /// Submission date (verbatim service string).
    pub reception_date: String,
    /// Public status name.
    pub status_name: String,
    /// Optional public status description.
    pub status_description: Option<String>,
    /// Internal processing status name.
    pub internal_status: String,
    /// Completion percent (0–100).
    pub percent: i32,
}

impl From<StatusResponse> for StatusSnapshot {
    fn from(response: StatusResponse) -> Self {
        Self {
            uid: response.uid,
            reception_date: response.reception_date,
            status_name: response.passport_status.name,
            status_description: response.passport_status.description,
            internal_status: response.internal_status.name,
            percent: response.internal_status.percent,
        }
    }
}

/// HTTP client for the application status endpoint.
#[derive(Debug, Clone)]
pub struct StatusClient {
    base_url: String,
    client: reqwest::Client,
}

impl StatusClient {
    /// Create a client for the given base endpoint URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the current status of one application.
    ///
    /// # Errors
    ///
    /// - [`WatchError::Transport`] on connection failure.
    /// - [`WatchError::InvalidRequestId`] when the service rejects the id.
    /// - [`WatchError::Status`] on any other non-success response.
    /// - [`WatchError::Parse`] when the body is not the expected JSON shape.
    pub async fn fetch(&self, request_id: &str) -> Result<StatusSnapshot> {
        let url = format!("{}{}", self.base_url, request_id);

        tracing::debug!(request_id, url = %url, "fetching application status");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| WatchError::Transport(format!("connection error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read body".into());
            tracing::error!(request_id, status = %status, body = %body, "status request returned error");
            return Err(classify_http_error(status, &body, request_id));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WatchError::Transport(format!("failed to read body: {e}")))?;
        let parsed: StatusResponse =
            serde_json::from_str(&body).map_err(|e| WatchError::Parse(e.to_string()))?;

        Ok(parsed.into())
    }
}

/// Map HTTP error responses to typed errors.
fn classify_http_error(
    status: reqwest::StatusCode,
    body: &str,
    request_id: &str,
) -> WatchError {
    if status == reqwest::StatusCode::BAD_REQUEST
        && error_code(body).as_deref() == Some(INVALID_UID_CODE)
    {
        return WatchError::InvalidRequestId(request_id.to_owned());
    }
    WatchError::Status {
        status: status.as_u16(),
        detail: extract_error_detail(body),
    }
}

/// Pull the structured error code out of an error body, if any.
fn error_code(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("code").and_then(|c| c.as_str()).map(String::from))
}

/// Extract a human-readable detail from an error response body.
fn extract_error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                "no response body".to_string()
            } else {
                body.chars().take(500).collect()
            }
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    const FULL_BODY: &str = r#"{
        "uid": "2000123456",
        "receptionDate": "2024-11-02",
        "passportStatus": { "name": "В обработке", "description": "Документы проверяются" },
        "internalStatus": { "name": "Оформление", "percent": 42 }
    }"#;

    #[test]
    fn response_flattens_into_snapshot() {
        let parsed: StatusResponse = serde_json::from_str(FULL_BODY).unwrap();
        let snapshot = StatusSnapshot::from(parsed);
        assert_eq!(snapshot.uid, "2000123456");
        assert_eq!(snapshot.reception_date, "2024-11-02");
        assert_eq!(snapshot.status_name, "В обработке");
        assert_eq!(
            snapshot.status_description.as_deref(),
            Some("Документы проверяются")
        );
        assert_eq!(snapshot.internal_status, "Оформление");
        assert_eq!(snapshot.percent, 42);
    }

    #[test]
    fn missing_description_is_none() {
        let body = r#"{
            "uid": "1",
            "receptionDate": "2024-01-01",
            "passportStatus": { "name": "Принято" },
            "internalStatus": { "name": "Старт", "percent": 0 }
        }"#;
        let parsed: StatusResponse = serde_json::from_str(body).unwrap();
        let snapshot = StatusSnapshot::from(parsed);
        assert!(snapshot.status_description.is_none());
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let body = r#"{ "uid": "1", "receptionDate": "2024-01-01" }"#;
        let result = serde_json::from_str::<StatusResponse>(body);
        assert!(result.is_err());
    }

    #[test]
    fn http_400_with_invalid_uid_code_is_invalid_request_id() {
        let err = classify_http_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"code": "REQUEST_UID_NOT_VALID", "message": "bad uid"}"#,
            "99999",
        );
        assert!(matches!(err, WatchError::InvalidRequestId(id) if id == "99999"));
    }

    #[test]
    fn http_400_without_code_is_generic_status_error() {
        let err = classify_http_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message": "something else"}"#,
            "99999",
        );
        assert!(matches!(
            err,
            WatchError::Status { status: 400, detail } if detail == "something else"
        ));
    }

    #[test]
    fn http_500_carries_truncated_body_detail() {
        let err = classify_http_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom", "1");
        assert!(matches!(
            err,
            WatchError::Status { status: 500, detail } if detail == "boom"
        ));
    }

    #[test]
    fn empty_error_body_has_placeholder_detail() {
        let err = classify_http_error(reqwest::StatusCode::NOT_FOUND, "", "1");
        assert!(matches!(
            err,
            WatchError::Status { status: 404, detail } if detail == "no response body"
        ));
    }
}
