//! Book record and form data (client shape)

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical client-side book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Genre, named `type` on the wire
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, rename = "coverImageURL", skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, rename = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Soft-deletion timestamp, always present (possibly null)
    #[serde(default, rename = "deleted_at")]
    pub deleted_at: Option<String>,
}

impl Book {
    /// Whether the backend reports this record as soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A number typed into a form: unset, already numeric, or raw text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NumericInput {
    #[default]
    Empty,
    Number(i64),
    Text(String),
}

impl NumericInput {
    /// True when nothing has been entered
    pub fn is_empty(&self) -> bool {
        match self {
            NumericInput::Empty => true,
            NumericInput::Number(_) => false,
            NumericInput::Text(s) => s.trim().is_empty(),
        }
    }

    /// Integer value of the input. Text yields its leading integer, so
    /// `"12.5"` is 12 and `"1965abc"` is 1965; text without leading digits is `None`.
    pub fn parse(&self) -> Option<i64> {
        match self {
            NumericInput::Empty => None,
            NumericInput::Number(n) => Some(*n),
            NumericInput::Text(s) => leading_integer(s),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Number(n)
    }
}

impl From<i32> for NumericInput {
    fn from(n: i32) -> Self {
        NumericInput::Number(i64::from(n))
    }
}

impl From<Option<i32>> for NumericInput {
    fn from(n: Option<i32>) -> Self {
        n.map_or(NumericInput::Empty, NumericInput::from)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::from(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        if s.trim().is_empty() {
            NumericInput::Empty
        } else {
            NumericInput::Text(s)
        }
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericInput::Empty => Ok(()),
            NumericInput::Number(n) => write!(f, "{}", n),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for NumericInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumericInput::Empty => serializer.serialize_str(""),
            NumericInput::Number(n) => serializer.serialize_i64(*n),
            NumericInput::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for NumericInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => NumericInput::Empty,
            Some(Raw::Number(n)) => NumericInput::Number(n),
            Some(Raw::Text(s)) => NumericInput::from(s),
        })
    }
}

/// Form fields of an add/edit action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFormData {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: NumericInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default)]
    pub pages: NumericInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, rename = "coverImageURL", skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl From<&Book> for BookFormData {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: NumericInput::from(book.year),
            isbn: book.isbn.clone(),
            description: book.description.clone(),
            genre: book.genre.clone(),
            pages: NumericInput::from(book.pages),
            publisher: book.publisher.clone(),
            cover_image_url: book.cover_image_url.clone(),
        }
    }
}

/// Names of the editable form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Title,
    Author,
    Year,
    Isbn,
    Description,
    Type,
    Pages,
    Publisher,
    CoverImageUrl,
}

impl BookField {
    /// Key used in validation error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Year => "year",
            BookField::Isbn => "isbn",
            BookField::Description => "description",
            BookField::Type => "type",
            BookField::Pages => "pages",
            BookField::Publisher => "publisher",
            BookField::CoverImageUrl => "coverImageURL",
        }
    }
}

impl BookFormData {
    /// Replace one field with text typed by the user
    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        let value = value.into();
        let optional = |v: String| if v.is_empty() { None } else { Some(v) };
        match field {
            BookField::Title => self.title = value,
            BookField::Author => self.author = value,
            BookField::Year => self.year = NumericInput::from(value),
            BookField::Isbn => self.isbn = optional(value),
            BookField::Description => self.description = optional(value),
            BookField::Type => self.genre = optional(value),
            BookField::Pages => self.pages = NumericInput::from(value),
            BookField::Publisher => self.publisher = optional(value),
            BookField::CoverImageUrl => self.cover_image_url = optional(value),
        }
    }
}
