use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid preferences: {0}")]
    InputShape(String),

    #[error("Itinerary generation failed: {0}")]
    Generation(String),

    #[error("Trip storage failed: {0}")]
    Persistence(String),

    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether the user can reasonably try the same action again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Generation(_) | PlannerError::Persistence(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InputShape(_) => "INPUT_SHAPE_ERROR",
            PlannerError::Generation(_) => "GENERATION_ERROR",
            PlannerError::Persistence(_) => "PERSISTENCE_ERROR",
            PlannerError::TripNotFound(_) => "TRIP_NOT_FOUND",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP status code this error maps to at the server boundary
    pub fn status_code(&self) -> u16 {
        match self {
            PlannerError::InputShape(_) => 400,
            PlannerError::TripNotFound(_) => 404,
            _ => 500,
        }
    }

    /// Message safe to show a caller. Upstream and internal failures collapse to a
    /// fixed text; the full error is only logged.
    pub fn client_message(&self) -> String {
        match self {
            PlannerError::Generation(_) => "Failed to generate itinerary".to_string(),
            PlannerError::Config(_) | PlannerError::Serialization(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.client_message(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults_map_to_4xx() {
        assert_eq!(PlannerError::InputShape("x".into()).status_code(), 400);
        assert_eq!(PlannerError::TripNotFound("x".into()).status_code(), 404);
        assert_eq!(PlannerError::Generation("x".into()).status_code(), 500);
        assert_eq!(PlannerError::Persistence("x".into()).status_code(), 500);
    }

    #[test]
    fn persistence_failures_are_retryable() {
        let err = PlannerError::Persistence("lock poisoned".into());
        let payload = err.to_error_payload();
        assert_eq!(payload["error"]["code"], "PERSISTENCE_ERROR");
        assert_eq!(payload["error"]["retryable"], true);
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("lock poisoned"));
    }

    #[test]
    fn upstream_failures_are_opaque_to_callers() {
        let err = PlannerError::Generation(
            "daily itinerary: HTTP 400 Bad Request error: API key not valid".into(),
        );
        let payload = err.to_error_payload();
        assert_eq!(payload["error"]["message"], "Failed to generate itinerary");
        assert!(err.to_string().contains("API key not valid"));

        let config = PlannerError::Config("GOOGLE_API_KEY is not set".into());
        assert_eq!(config.to_error_payload()["error"]["message"], "Internal server error");

        let input = PlannerError::InputShape("missing Budget".into());
        assert!(input.client_message().contains("missing Budget"));
    }
}
