//! Derived (searched and filtered) views of the collection

use tokio::sync::watch;

use crate::{
    models::{Book, FilterOptions},
    store::{BookStore, BooksState},
};

/// Types offered when the collection has none yet
pub const FALLBACK_TYPES: [&str; 10] = [
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Fantasy",
    "Biography",
    "History",
    "Self-Help",
    "Business",
];

/// Keep the books matching the search text and every set filter, in collection order
pub fn filter_books(books: &[Book], query: &str, filters: &FilterOptions) -> Vec<Book> {
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| {
            needle.is_empty()
                || book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .filter(|book| filters.genre().map_or(true, |g| book.genre.as_deref() == Some(g)))
        .filter(|book| filters.min_year().map_or(true, |min| book.year >= min))
        .filter(|book| filters.max_year().map_or(true, |max| book.year <= max))
        .cloned()
        .collect()
}

/// Distinct non-blank types of the collection, or the fallback list
pub fn type_options(books: &[Book]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for genre in books.iter().filter_map(|b| b.genre.as_deref()) {
        if !genre.trim().is_empty() && !types.iter().any(|t| t == genre) {
            types.push(genre.to_string());
        }
    }
    if types.is_empty() {
        FALLBACK_TYPES.iter().map(|t| t.to_string()).collect()
    } else {
        types
    }
}

/// Search text plus filter criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub query: String,
    pub filters: FilterOptions,
}

impl BookFilter {
    pub fn new(query: impl Into<String>, filters: FilterOptions) -> Self {
        Self {
            query: query.into(),
            filters,
        }
    }

    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        filter_books(books, &self.query, &self.filters)
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.filters.is_active()
    }
}

/// Filtered view that follows both the store and its own criteria.
///
/// [`FilteredView::changed`] resolves with a freshly derived list whenever a
/// store transition lands or the criteria are edited.
pub struct FilteredView {
    state: watch::Receiver<BooksState>,
    criteria_tx: watch::Sender<BookFilter>,
    criteria: watch::Receiver<BookFilter>,
}

impl FilteredView {
    pub fn new(store: &BookStore) -> Self {
        Self::with_filter(store, BookFilter::default())
    }

    pub fn with_filter(store: &BookStore, filter: BookFilter) -> Self {
        let (criteria_tx, criteria) = watch::channel(filter);
        Self {
            state: store.subscribe(),
            criteria_tx,
            criteria,
        }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.criteria_tx.send_modify(|c| c.query = query);
    }

    pub fn set_filters(&self, filters: FilterOptions) {
        self.criteria_tx.send_modify(|c| c.filters = filters);
    }

    /// Drop the search text and every filter
    pub fn clear(&self) {
        self.criteria_tx.send_replace(BookFilter::default());
    }

    pub fn filter(&self) -> BookFilter {
        self.criteria.borrow().clone()
    }

    /// Current derived list
    pub fn books(&self) -> Vec<Book> {
        let criteria = self.criteria.borrow();
        criteria.apply(&self.state.borrow().books)
    }

    /// Size of the full collection
    pub fn total_count(&self) -> usize {
        self.state.borrow().books.len()
    }

    /// Size of the derived list
    pub fn filtered_count(&self) -> usize {
        self.books().len()
    }

    /// Wait for the next change on either side and return the new list.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Vec<Book>> {
        tokio::select! {
            res = self.state.changed() => res.ok()?,
            res = self.criteria.changed() => res.ok()?,
        }
        let _ = self.state.borrow_and_update();
        let _ = self.criteria.borrow_and_update();
        Some(self.books())
    }
}
