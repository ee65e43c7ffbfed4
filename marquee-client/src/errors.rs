//! Error types for the movie catalog client.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while talking to the movie catalog backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network communication with the backend failed.
    #[error("network error: {reason}")]
    Network {
        /// The reason for the transport failure
        reason: String,
    },

    /// The backend rejected the caller's identity even after a forced
    /// token refresh.
    #[error("not authorized")]
    Unauthorized,

    /// The backend refused the operation for this identity.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// The reason the backend gave
        reason: String,
    },

    /// The requested record does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// What was looked up
        resource: String,
    },

    /// The backend answered with an unexpected status.
    #[error("backend error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {reason}")]
    Decode {
        /// The reason decoding failed
        reason: String,
    },

    /// The payload failed client-side validation before dispatch.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network { .. } => {
                "Could not reach the movie service. Check your connection and try again."
                    .to_string()
            }
            ClientError::Unauthorized => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ClientError::Forbidden { .. } => {
                "You don't have permission to do that.".to_string()
            }
            ClientError::NotFound { resource } => format!("{resource} was not found."),
            ClientError::Api { .. } => {
                "The movie service reported an error. Please try again.".to_string()
            }
            ClientError::Decode { .. } => {
                "The movie service returned an unexpected response.".to_string()
            }
            ClientError::Validation(error) => error.to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_validation_is_the_rule_text() {
        let error = ClientError::Validation(ValidationError::TitleRequired);
        assert_eq!(error.user_message(), "Title is required");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_user_message_avoids_internals() {
        let error = ClientError::Network {
            reason: "connection refused (os error 111)".to_string(),
        };
        assert!(!error.user_message().contains("os error"));
        assert!(!error.is_user_error());
    }
}
