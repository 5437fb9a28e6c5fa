//! Field validation rules for book forms.
//!
//! Every rule runs on every call and fields never depend on each other. The only
//! input besides the form is the current year, which bounds publication years.

use std::fmt;

use chrono::Datelike;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::book::{BookFormData, NumericInput};

static ISBN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?:97[89])?[0-9]{9}[0-9X])$").expect("valid ISBN regex"));

/// Earliest accepted publication year
pub const MIN_YEAR: i64 = 1000;

/// Which optional rules are enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ValidationPolicy {
    /// Reject forms without a type (genre)
    pub require_type: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { require_type: true }
    }
}

/// Field name to error message. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub(crate) fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub(crate) fn remove(&mut self, field: &str) {
        self.0.shift_remove(field);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a form against the current local year and the default policy
pub fn validate_book(data: &BookFormData) -> ValidationErrors {
    validate_book_at(data, chrono::Local::now().year(), &ValidationPolicy::default())
}

/// Validate a form with an explicit current year and policy
pub fn validate_book_at(
    data: &BookFormData,
    current_year: i32,
    policy: &ValidationPolicy,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(message) = check_name(&data.title, "Title is required", "Title must be at least 2 characters long") {
        errors.insert("title", message);
    }

    if let Some(message) = check_name(
        &data.author,
        "Author is required",
        "Author name must be at least 2 characters long",
    ) {
        errors.insert("author", message);
    }

    if let Some(message) = check_year(&data.year, current_year) {
        errors.insert("year", message);
    }

    if let Some(isbn) = data.isbn.as_deref() {
        if !isbn.trim().is_empty() && !is_valid_isbn(isbn) {
            errors.insert("isbn", "Invalid ISBN format");
        }
    }

    if !data.pages.is_empty() && !matches!(data.pages.parse(), Some(p) if p >= 1) {
        errors.insert("pages", "Pages must be a positive number");
    }

    let genre = data.genre.as_deref().unwrap_or("").trim();
    if genre.is_empty() {
        if policy.require_type {
            errors.insert("type", "Type is required");
        }
    } else if genre.chars().count() < 2 {
        errors.insert("type", "Type must be at least 2 characters long");
    }

    errors
}

/// Whether a validation pass found anything
pub fn has_validation_errors(errors: &ValidationErrors) -> bool {
    !errors.is_empty()
}

/// Check an ISBN-10 or ISBN-13, ignoring hyphens and whitespace
pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_REGEX.is_match(&normalize_isbn(isbn))
}

/// Strip hyphens and whitespace from an ISBN
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

fn check_name(value: &str, missing: &'static str, too_short: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(missing)
    } else if trimmed.chars().count() < 2 {
        Some(too_short)
    } else {
        None
    }
}

fn check_year(year: &NumericInput, current_year: i32) -> Option<String> {
    if year.is_empty() {
        return Some("Publication year is required".to_string());
    }
    let max = i64::from(current_year) + 1;
    match year.parse() {
        Some(y) if (MIN_YEAR..=max).contains(&y) => None,
        _ => Some(format!("Year must be between {} and {}", MIN_YEAR, max)),
    }
}
