//! Add/edit form session.
//!
//! A form lives from the start of an add or edit action until it is submitted
//! successfully or dropped. Editing a field clears that field's error, leaving a
//! field re-checks only that field, and submitting re-checks everything before
//! any request is made.

use chrono::Datelike;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookField, BookFormData},
    services::catalog::CatalogService,
    validation::{validate_book_at, ValidationErrors, ValidationPolicy},
};

#[derive(Debug, Clone)]
pub struct BookForm {
    data: BookFormData,
    errors: ValidationErrors,
    editing: Option<String>,
    policy: ValidationPolicy,
    current_year: i32,
}

impl BookForm {
    /// Empty form for a new book
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            data: BookFormData::default(),
            errors: ValidationErrors::new(),
            editing: None,
            policy,
            current_year: chrono::Local::now().year(),
        }
    }

    /// Form hydrated from an existing book
    pub fn edit(book: &Book, policy: ValidationPolicy) -> Self {
        Self {
            data: BookFormData::from(book),
            editing: Some(book.id.clone()),
            ..Self::new(policy)
        }
    }

    /// Pin the year used for the publication year upper bound
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn data(&self) -> &BookFormData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Id of the book being edited, `None` when adding
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Field change: store the value and forget the field's stale error
    pub fn set_field(&mut self, field: BookField, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.remove(field.as_str());
    }

    /// Field blur: re-check the form and keep only this field's verdict
    pub fn blur(&mut self, field: BookField) {
        let key = field.as_str();
        let checked = self.check();
        match checked.get(key) {
            Some(message) => self.errors.insert(key, message),
            None => self.errors.remove(key),
        }
    }

    /// Run every rule; returns true when the form is valid
    pub fn validate(&mut self) -> bool {
        self.errors = self.check();
        self.errors.is_empty()
    }

    /// Validate, then create or update through the catalog.
    /// An invalid form fails with [`AppError::Validation`] without any request.
    /// On success the form is emptied and turns into an add form; on a remote
    /// failure it keeps what was typed.
    pub async fn submit(&mut self, catalog: &CatalogService) -> AppResult<Book> {
        if !self.validate() {
            tracing::debug!("Form rejected: {}", self.errors);
            return Err(AppError::Validation(self.errors.clone()));
        }

        let book = match self.editing.as_deref() {
            Some(id) => catalog.update_book(id, &self.data).await?,
            None => catalog.create_book(&self.data).await?,
        };

        self.data = BookFormData::default();
        self.errors = ValidationErrors::new();
        self.editing = None;
        Ok(book)
    }

    fn check(&self) -> ValidationErrors {
        validate_book_at(&self.data, self.current_year, &self.policy)
    }
}
