use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::errors::ValidationError;
use crate::infrastructure::storage::StorageError;

/// Category of an auth failure, for callers that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    Conflict,
    Validation,
    NotFound,
    Transport,
    Internal,
}

/// Errors returned by auth providers and the API client
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Validation {
        message: String,
        details: BTreeMap<String, String>,
    },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Unauthorized { .. } => ErrorKind::Unauthorized,
            AuthError::Conflict { .. } => ErrorKind::Conflict,
            AuthError::Validation { .. } => ErrorKind::Validation,
            AuthError::NotFound { .. } => ErrorKind::NotFound,
            AuthError::Transport(_) => ErrorKind::Transport,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status the remote API uses for this failure
    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Unauthorized => 401,
            ErrorKind::Conflict => 409,
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Transport => 503,
            ErrorKind::Internal => 500,
        }
    }

    /// Field-level details, present only for validation failures
    pub fn details(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            AuthError::Validation { details, .. } => Some(details),
            _ => None,
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation {
            message: "Validation error".to_string(),
            details: err.details,
        }
    }
}
