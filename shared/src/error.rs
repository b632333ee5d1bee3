use thiserror::Error;

/// Failure classes for calls to the prediction service and the database.
/// The UI collapses all of them into one generic banner, but the class
/// decides whether the history fallback runs and what gets logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// History retrieval policy: only an HTTP-level rejection from the
    /// primary endpoint diverts to the database fallback. Transport and
    /// decode failures surface directly so the list keeps its last value.
    pub fn diverts_to_fallback(&self) -> bool {
        matches!(self, ApiError::Status(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_status_errors_divert_to_fallback() {
        assert!(ApiError::Status(500).diverts_to_fallback());
        assert!(ApiError::Status(404).diverts_to_fallback());
        assert!(!ApiError::Transport("connection refused".into()).diverts_to_fallback());
        assert!(!ApiError::Decode("unexpected token".into()).diverts_to_fallback());
    }

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(
            ApiError::Status(500).to_string(),
            "server responded with status 500"
        );
        assert_eq!(
            ApiError::Transport("timeout".into()).to_string(),
            "network error: timeout"
        );
    }
}
