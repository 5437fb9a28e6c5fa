//! Remote book service client.
//!
//! This is the only place that performs I/O. Requests are never retried, cached
//! or throttled; a failure is reported once and the caller decides what to do.

pub mod books;
pub mod health;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{ApiError, AppResult},
    models::{Book, BookFormData, BookQuery},
};

pub use books::HttpBookApi;
pub use health::HealthStatus;

/// CRUD operations offered by the book service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookApi: Send + Sync {
    /// `GET /books`, optionally filtered server-side
    async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>>;

    /// `GET /books/{id}`
    async fn get_book(&self, id: &str) -> AppResult<Book>;

    /// `POST /books`
    async fn create_book(&self, data: &BookFormData) -> AppResult<Book>;

    /// `PUT /books/{id}`
    async fn update_book(&self, id: &str, data: &BookFormData) -> AppResult<Book>;

    /// `DELETE /books/{id}`
    async fn delete_book(&self, id: &str) -> AppResult<()>;

    /// `GET /health`
    async fn health(&self) -> AppResult<HealthStatus>;
}

/// Successful response after the envelope has been removed
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Envelope {
    pub status: u16,
    pub data: Option<Value>,
}

/// Apply the response policy to a raw HTTP response.
///
/// Success needs a 2xx status and a `success` flag that is not `false`. The
/// payload is the `data` member when present, otherwise the whole body. On
/// failure the backend's `error` string wins over a status-derived message.
pub(crate) fn unwrap_envelope(status: u16, body: &[u8]) -> Result<Envelope, ApiError> {
    let value: Option<Value> = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice(body).ok()
    };

    let flag = value
        .as_ref()
        .and_then(|v| v.get("success"))
        .and_then(Value::as_bool);

    if (200..300).contains(&status) && flag != Some(false) {
        let data = match value {
            Some(Value::Object(mut map)) if map.contains_key("data") => map.remove("data"),
            other => other,
        };
        return Ok(Envelope { status, data });
    }

    let message = value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());

    Err(match message {
        Some(message) => ApiError::backend(message, status),
        None => ApiError::from_status(status),
    })
}
