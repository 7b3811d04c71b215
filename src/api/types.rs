//! Request and response bodies of the backend endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }

    /// Backend timestamps are naive UTC ISO-8601.
    pub fn parsed_timestamp(&self) -> Option<chrono::NaiveDateTime> {
        chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub filename: String,
    pub file_size: u64,
}

/// Error body the backend sends for rejected uploads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// FastAPI's `HTTPException` body.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Most specific user-facing text in the payload: `message`, then a
    /// string `detail`, then the first validation error's `msg`.
    pub fn best_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return Some(message.to_string());
        }
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string),
            _ => None,
        }
    }

    /// Parse a raw body, yielding the best message if it was structured.
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.best_message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub session_id: String,
    pub company: String,
    pub role_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis_id: String,
    pub session_id: String,
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_preferred_over_detail() {
        let body = r#"{"error": "Validation error", "message": "File is empty", "detail": "other"}"#;
        assert_eq!(ErrorResponse::message_from_body(body).as_deref(), Some("File is empty"));
    }

    #[test]
    fn test_detail_string_used_when_no_message() {
        let body = r#"{"detail": "Session not found: abc"}"#;
        assert_eq!(
            ErrorResponse::message_from_body(body).as_deref(),
            Some("Session not found: abc")
        );
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "company"], "msg": "Invalid company", "type": "value_error"}]}"#;
        assert_eq!(ErrorResponse::message_from_body(body).as_deref(), Some("Invalid company"));
    }

    #[test]
    fn test_unstructured_body_has_no_message() {
        assert_eq!(ErrorResponse::message_from_body("<html>502 Bad Gateway</html>"), None);
        assert_eq!(ErrorResponse::message_from_body(r#"{"message": "  "}"#), None);
    }

    #[test]
    fn test_health_timestamp() {
        let health = HealthStatus {
            status: "healthy".to_string(),
            timestamp: "2025-01-05T10:20:30.123456".to_string(),
            service: "Ready2Intern API".to_string(),
        };
        assert!(health.is_healthy());
        assert!(health.parsed_timestamp().is_some());
    }
}
