//! Backend record shape and its conversions to and from the client shape.
//!
//! The backend speaks snake_case and has shipped several spellings for the cover
//! and genre fields over time; everything past this module only sees [`Book`].
//! Unknown backend fields are ignored. Records missing a required field or
//! carrying the wrong JSON type fail to deserialize instead of being patched up.

use serde::{Deserialize, Serialize};

use super::book::{Book, BookFormData, NumericInput};
use crate::error::{AppError, AppResult};

/// Book record as returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type", alias = "genre")]
    pub genre: Option<String>,
    #[serde(default)]
    pub pages: Option<i32>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default, alias = "coverImageURL", alias = "coverUrl")]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl TryFrom<RemoteBook> for Book {
    type Error = AppError;

    fn try_from(remote: RemoteBook) -> AppResult<Self> {
        if remote.id.trim().is_empty() {
            return Err(AppError::InvalidRecord("record has an empty id".to_string()));
        }

        Ok(Self {
            id: remote.id,
            title: remote.title,
            author: remote.author,
            year: remote.year,
            isbn: present(remote.isbn),
            description: present(remote.description),
            genre: present(remote.genre),
            pages: remote.pages,
            publisher: present(remote.publisher),
            cover_image_url: present(remote.cover_image_url),
            created_at: present(remote.created_at),
            updated_at: present(remote.updated_at),
            deleted_at: remote.deleted_at,
        })
    }
}

/// Decode one raw backend record into a client book
pub fn book_from_value(value: serde_json::Value) -> AppResult<Book> {
    let remote: RemoteBook =
        serde_json::from_value(value).map_err(|e| AppError::InvalidRecord(e.to_string()))?;
    Book::try_from(remote)
}

/// Decode a list payload; `null` is an empty list
pub fn books_from_value(value: serde_json::Value) -> AppResult<Vec<Book>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let remote: Vec<RemoteBook> =
        serde_json::from_value(value).map_err(|e| AppError::InvalidRecord(e.to_string()))?;
    remote.into_iter().map(Book::try_from).collect()
}

/// Create/update request body in the backend's naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl TryFrom<&BookFormData> for BookPayload {
    type Error = AppError;

    fn try_from(form: &BookFormData) -> AppResult<Self> {
        Ok(Self {
            title: form.title.clone(),
            author: form.author.clone(),
            year: number(&form.year, "year")?,
            isbn: present(form.isbn.clone()),
            description: present(form.description.clone()),
            genre: present(form.genre.clone()),
            pages: number(&form.pages, "pages")?,
            publisher: present(form.publisher.clone()),
            cover_image_url: present(form.cover_image_url.clone()),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn number(input: &NumericInput, field: &'static str) -> AppResult<Option<i64>> {
    if input.is_empty() {
        return Ok(None);
    }
    input.parse().map(Some).ok_or_else(|| AppError::InvalidInput {
        field,
        value: input.to_string(),
    })
}
