// Error types for hold-type operations

use thiserror::Error;

/// Result type alias for hold operations
pub type Result<T> = std::result::Result<T, HoldError>;

/// Errors that can occur while adding, disabling or querying holds
#[derive(Debug, Error)]
pub enum HoldError {
    /// A required input field was missing or blank
    #[error("{0}")]
    InvalidInput(String),

    /// The addressed container does not exist
    #[error("Container not found")]
    NotFound(String),

    /// The container already carries an active entry of this hold type
    #[error("Hold type with status true already exists")]
    DuplicateActiveHold(String),

    /// The container has no active entry of this hold type
    #[error("Hold type is not active or doesn't exist")]
    NoActiveHold(String),

    /// Storage or other unexpected failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HoldError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        HoldError::InvalidInput(msg.into())
    }

    /// Create a not found error for a container key (id or number)
    pub fn not_found(key: impl Into<String>) -> Self {
        HoldError::NotFound(key.into())
    }

    /// True for errors caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        !matches!(self, HoldError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            HoldError::DuplicateActiveHold("CUSTOMS".into()).to_string(),
            "Hold type with status true already exists"
        );
        assert_eq!(
            HoldError::NoActiveHold("CUSTOMS".into()).to_string(),
            "Hold type is not active or doesn't exist"
        );
        assert_eq!(HoldError::not_found("abc").to_string(), "Container not found");
    }

    #[test]
    fn test_internal_is_not_client_error() {
        let err: HoldError = anyhow::anyhow!("connection reset").into();
        assert!(!err.is_client_error());
        assert!(HoldError::invalid_input("Hold type is required").is_client_error());
    }
}
