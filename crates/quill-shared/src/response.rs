//! Standardized error responses (RFC 7807 problem documents).

use serde::{Deserialize, Serialize};

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_carries_detail() {
        let body = ErrorResponse::bad_request("unknown status value");
        assert_eq!(body.status, 400);
        assert_eq!(body.title, "Bad Request");
        assert_eq!(body.detail.as_deref(), Some("unknown status value"));
    }

    #[test]
    fn serializes_as_problem_document() {
        let json = serde_json::to_value(ErrorResponse::unauthorized()).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 401);
        // Absent detail is omitted entirely rather than serialized as null.
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn forbidden_gains_detail_via_builder() {
        let body = ErrorResponse::forbidden().with_detail("session not on the allow list");
        assert_eq!(body.status, 403);
        assert_eq!(body.detail.as_deref(), Some("session not on the allow list"));
    }
}
