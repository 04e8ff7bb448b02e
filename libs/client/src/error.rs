//! Error types for the client core

use thiserror::Error;
use uuid::Uuid;

use crate::envelope::EnvelopeError;

/// Errors surfaced by the data clients and the flows built on them
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the backend
    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match any known envelope shape
    #[error("Malformed response: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Response body was not JSON
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Action requires a signed-in user
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Caller does not own the review
    #[error("Only the author can delete this review")]
    NotOwner,

    /// Review id is not among the reviews currently shown
    #[error("Review {0} is not in the loaded list")]
    UnknownReview(Uuid),
}

impl ClientError {
    /// HTTP status of a rejected request, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
