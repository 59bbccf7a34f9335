//! Error types for the RSVP service.

use thiserror::Error;

/// Errors that can occur while accepting or storing RSVPs.
#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RsvpError {
    /// True when the caller can fix the request (HTTP 400), false for server-side failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RsvpError::Validation(_))
    }
}

impl From<serde_json::Error> for RsvpError {
    fn from(err: serde_json::Error) -> Self {
        RsvpError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for RsvpError {
    fn from(err: reqwest::Error) -> Self {
        RsvpError::Storage(err.to_string())
    }
}

/// Result type alias for RSVP operations.
pub type RsvpResult<T> = Result<T, RsvpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validation_is_client_error() {
        assert!(RsvpError::Validation("missing name".into()).is_client_error());
        assert!(!RsvpError::Storage("down".into()).is_client_error());
        assert!(!RsvpError::Io(std::io::Error::other("disk")).is_client_error());
        assert!(!RsvpError::Serialization("bad json".into()).is_client_error());
    }

    #[test]
    fn test_validation_message_is_bare() {
        let err = RsvpError::Validation("Missing required fields (name, email)".into());
        assert_eq!(err.to_string(), "Missing required fields (name, email)");
    }
}
