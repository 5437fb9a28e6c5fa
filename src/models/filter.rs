//! Search and filter criteria

use serde::{Deserialize, Serialize};

/// Inclusive publication year range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

/// Client-side filter criteria applied on top of the search text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Exact genre (`type`) match; empty means unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
}

impl FilterOptions {
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }

    pub fn min_year(&self) -> Option<i32> {
        self.year_range.and_then(|r| r.min)
    }

    pub fn max_year(&self) -> Option<i32> {
        self.year_range.and_then(|r| r.max)
    }

    /// True when at least one criterion is set
    pub fn is_active(&self) -> bool {
        self.genre().is_some() || self.min_year().is_some() || self.max_year().is_some()
    }
}

/// Server-side filters accepted by `GET /books`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookQuery {
    /// Case-insensitive title substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Case-insensitive author substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Exact publication year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Exact genre
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl BookQuery {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
