//! Bookshelf
//!
//! Client core for a personal book catalog served by a REST backend: field
//! validation, backend record normalization, an HTTP client, an observable
//! in-memory store, derived search/filter views, and the orchestration that
//! ties remote calls to store transitions.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod query;
pub mod services;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use error::{ApiError, AppError, AppResult};
pub use store::BookStore;

/// One application instance: configuration, its store and the services using it
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: BookStore,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build a fresh instance talking to the configured backend
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = BookStore::new();
        let services = services::Services::new(&config.api, store.clone())?;
        Ok(Self {
            config: Arc::new(config),
            store,
            services: Arc::new(services),
        })
    }

    /// Start an empty add form using the configured validation policy
    pub fn new_form(&self) -> form::BookForm {
        form::BookForm::new(self.config.validation)
    }

    /// Start an edit form for an existing book
    pub fn edit_form(&self, book: &models::Book) -> form::BookForm {
        form::BookForm::edit(book, self.config.validation)
    }

    /// Filtered view over this instance's store
    pub fn filtered_view(&self, filter: query::BookFilter) -> query::FilteredView {
        query::FilteredView::with_filter(&self.store, filter)
    }
}
