//! Error types
//!
//! Validation failures block a submission; sync failures are reported to
//! the user as a notification and never abort the session.

use thiserror::Error;

use crate::record::Field;

/// Add-form input rejected before it reaches the store
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming
    #[error("Missing required field: {0}")]
    MissingField(Field),
}

/// Errors talking to the remote document store
#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport failure (connect, DNS, reset, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered with a non-2xx status
    #[error("Remote returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote document could not be decoded or encoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The in-process remote was told to fail
    #[error("Remote unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::MissingField(Field::CleanedBy);
        assert_eq!(err.to_string(), "Missing required field: cleanedBy");

        let err = SyncError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "Remote returned 503: down");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let sync_err: SyncError = json_err.into();
        assert!(matches!(sync_err, SyncError::Decode(_)));
    }
}
