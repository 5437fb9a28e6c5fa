//! HTTP implementation of the book service client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};

use super::{unwrap_envelope, BookApi, Envelope, HealthStatus};
use crate::{
    config::ApiConfig,
    error::{ApiError, AppError, AppResult},
    models::{
        remote_book::{book_from_value, books_from_value},
        Book, BookFormData, BookPayload, BookQuery,
    },
};

#[derive(Clone)]
pub struct HttpBookApi {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpBookApi {
    /// Build a client for the configured backend
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| AppError::InvalidInput {
                field: "base_url",
                value: config.base_url.clone(),
            })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended with path segments, each one percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn book_url(&self, id: &str) -> Url {
        self.url(&["books", id])
    }

    /// Send a request and apply the envelope policy
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Envelope, ApiError> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Book service request failed: {}", e);
            ApiError::network()
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read book service response: {}", e);
            ApiError::network()
        })?;

        let envelope = unwrap_envelope(status, &body);
        if let Err(ref e) = envelope {
            tracing::debug!("Book service answered {}: {}", status, e.message);
        }
        envelope
    }
}

/// Decode a single record from a successful response
fn decode_book(envelope: Envelope) -> AppResult<Book> {
    let data = envelope.data.ok_or_else(|| {
        ApiError::invalid_payload("Response did not contain a book", envelope.status)
    })?;
    book_from_value(data).map_err(|e| ApiError::invalid_payload(e.to_string(), envelope.status).into())
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        tracing::debug!("Listing books (query: {:?})", query);
        let envelope = self
            .execute(self.client.get(self.url(&["books"])).query(query))
            .await?;

        let status = envelope.status;
        let data = envelope.data.unwrap_or(serde_json::Value::Null);
        books_from_value(data).map_err(|e| ApiError::invalid_payload(e.to_string(), status).into())
    }

    async fn get_book(&self, id: &str) -> AppResult<Book> {
        tracing::debug!("Fetching book {}", id);
        let envelope = self.execute(self.client.get(self.book_url(id))).await?;
        decode_book(envelope)
    }

    async fn create_book(&self, data: &BookFormData) -> AppResult<Book> {
        let payload = BookPayload::try_from(data)?;
        tracing::debug!("Creating book \"{}\"", payload.title);
        let envelope = self
            .execute(self.client.post(self.url(&["books"])).json(&payload))
            .await?;
        decode_book(envelope)
    }

    async fn update_book(&self, id: &str, data: &BookFormData) -> AppResult<Book> {
        let payload = BookPayload::try_from(data)?;
        tracing::debug!("Updating book {}", id);
        let envelope = self
            .execute(self.client.put(self.book_url(id)).json(&payload))
            .await?;
        decode_book(envelope)
    }

    async fn delete_book(&self, id: &str) -> AppResult<()> {
        tracing::debug!("Deleting book {}", id);
        self.execute(self.client.delete(self.book_url(id))).await?;
        Ok(())
    }

    async fn health(&self) -> AppResult<HealthStatus> {
        let envelope = self.execute(self.client.get(self.url(&["health"]))).await?;
        let status = envelope.status;
        let data = envelope
            .data
            .ok_or_else(|| ApiError::invalid_payload("Empty health response", status))?;
        serde_json::from_value(data)
            .map_err(|e| ApiError::invalid_payload(format!("Invalid health response: {}", e), status).into())
    }
}
