//! Error types for the Bookshelf client

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Message used when the backend could not be reached at all
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: unable to reach the book service";

/// Where a remote failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with an `error` field
    Backend,
    /// The backend answered with a failure status and no usable message
    Status,
    /// No response was received
    Network,
    /// The response arrived but its payload is not a valid book record
    InvalidPayload,
}

/// Remote failure surfaced to callers and recorded in the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub kind: ApiErrorKind,
}

impl ApiError {
    pub fn backend(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            kind: ApiErrorKind::Backend,
        }
    }

    pub fn from_status(status: u16) -> Self {
        Self {
            message: format!("HTTP error! status: {}", status),
            status: Some(status),
            kind: ApiErrorKind::Status,
        }
    }

    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: None,
            kind: ApiErrorKind::Network,
        }
    }

    pub fn invalid_payload(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            kind: ApiErrorKind::InvalidPayload,
        }
    }

    /// Message written by the backend itself, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self.kind {
            ApiErrorKind::Backend => Some(self.message.as_str()),
            _ => None,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Invalid book record: {0}")]
    InvalidRecord(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl AppError {
    /// The remote failure behind this error, if it is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status carried by a remote failure
    pub fn status(&self) -> Option<u16> {
        self.as_api().and_then(|e| e.status)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
