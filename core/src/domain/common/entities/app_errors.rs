use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        raw_response: String,
    },

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>, raw_response: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            raw_response: raw_response.into(),
        }
    }

    /// Raw upstream text attached to a validation failure, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Validation { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}
