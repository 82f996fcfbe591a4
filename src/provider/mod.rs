pub mod cloudflare;

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// Outcome of a single API call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success(Value),
    Failure { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    Client,
    Server,
    Other,
}

impl FailureKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => FailureKind::Unauthorized,
            403 => FailureKind::Forbidden,
            404 => FailureKind::NotFound,
            429 => FailureKind::RateLimited,
            400..=499 => FailureKind::Client,
            500..=599 => FailureKind::Server,
            _ => FailureKind::Other,
        }
    }
}

impl ApiResponse {
    pub fn failure(status: StatusCode, body: String) -> Self {
        ApiResponse::Failure {
            status: status.as_u16(),
            body,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure { status, .. } => Some(FailureKind::from_status(*status)),
        }
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiResponse::Success(data) => match serde_json::to_string_pretty(data) {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{}", data),
            },
            ApiResponse::Failure { status, body } => {
                writeln!(f, "Error: {}", status)?;
                f.write_str(body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_output_has_status_and_body() {
        let response = ApiResponse::failure(StatusCode::FORBIDDEN, "forbidden".to_string());
        let output = response.to_string();
        assert!(output.contains("403"));
        assert!(output.contains("forbidden"));
        assert_eq!(output, "Error: 403\nforbidden");
    }

    #[test]
    fn success_output_is_json_body() {
        let body = json!({"success": true, "result": {"id": "u1"}});
        let output = ApiResponse::Success(body.clone()).to_string();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(FailureKind::from_status(401), FailureKind::Unauthorized);
        assert_eq!(FailureKind::from_status(403), FailureKind::Forbidden);
        assert_eq!(FailureKind::from_status(404), FailureKind::NotFound);
        assert_eq!(FailureKind::from_status(429), FailureKind::RateLimited);
        assert_eq!(FailureKind::from_status(400), FailureKind::Client);
        assert_eq!(FailureKind::from_status(503), FailureKind::Server);
        assert_eq!(FailureKind::from_status(302), FailureKind::Other);
    }

    #[test]
    fn success_has_no_failure_kind() {
        let response = ApiResponse::Success(json!({}));
        assert_eq!(response.failure_kind(), None);
    }
}
