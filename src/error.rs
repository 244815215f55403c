//! Client Error Types
//!
//! Every failure a handler can hit, from form validation through transport
//! and HTTP status to response decoding.

use thiserror::Error;

use crate::model::Id;

/// Errors surfaced by API calls and handlers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status; `message` is the server detail when present
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// Rejected before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client-side checks on forms and selections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a {0} name")]
    MissingName(&'static str),

    #[error("No budget selected")]
    NoBudget,

    #[error("No step selected")]
    NoStep,

    #[error("Choose a target step")]
    NoTargetStep,

    #[error("Choose an account")]
    NoAccount,

    #[error("Choose a destination account")]
    NoDestinationAccount,

    #[error("Choose a category")]
    NoCategory,

    #[error("Unknown budget #{0}")]
    UnknownBudget(Id),

    #[error("Step #{0} is not in the current budget")]
    UnknownStep(Id),

    #[error("Account #{0} is not in the current budget")]
    UnknownAccount(Id),

    #[error("Category #{0} is not in the current budget")]
    UnknownCategory(Id),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid owner id: {0}")]
    InvalidOwner(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_server_detail_only() {
        let err = ClientError::Status {
            status: 400,
            message: "bad request".to_string(),
        };
        assert_eq!(err.to_string(), "bad request");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ClientError = ValidationError::MissingName("budget").into();
        assert_eq!(err.to_string(), "Enter a budget name");
        assert_eq!(err.status(), None);
    }
}
