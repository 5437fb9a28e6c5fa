//! Catalog orchestration: remote calls sequenced with store transitions

use std::future::Future;
use std::sync::Arc;

use crate::{
    api::BookApi,
    error::{AppError, AppResult},
    models::{Book, BookFormData, BookQuery},
    store::{BookStore, BooksAction},
};

const FETCH_BOOKS_FAILED: &str = "Failed to fetch books";
const FETCH_BOOK_FAILED: &str = "Failed to fetch book";
const CREATE_BOOK_FAILED: &str = "Failed to create book";
const UPDATE_BOOK_FAILED: &str = "Failed to update book";
const DELETE_BOOK_FAILED: &str = "Failed to delete book";

#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn BookApi>,
    store: BookStore,
}

impl CatalogService {
    pub fn new(api: Arc<dyn BookApi>, store: BookStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Load the whole collection
    pub async fn fetch_books(&self) -> AppResult<Vec<Book>> {
        self.search_books(&BookQuery::default()).await
    }

    /// Load the collection filtered server-side; replaces the local collection
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.run(FETCH_BOOKS_FAILED, || self.api.list_books(query), |books: &Vec<Book>| {
            BooksAction::SetBooks(books.clone())
        })
        .await
    }

    /// Load one book and make it the selection
    pub async fn fetch_book_by_id(&self, id: &str) -> AppResult<Book> {
        self.run(FETCH_BOOK_FAILED, || self.api.get_book(id), |book: &Book| {
            BooksAction::SetSelectedBook(Some(book.clone()))
        })
        .await
    }

    pub async fn create_book(&self, data: &BookFormData) -> AppResult<Book> {
        let book = self
            .run(CREATE_BOOK_FAILED, || self.api.create_book(data), |book: &Book| {
                BooksAction::AddBook(book.clone())
            })
            .await?;
        tracing::info!("Created book {} \"{}\"", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: &str, data: &BookFormData) -> AppResult<Book> {
        let book = self
            .run(UPDATE_BOOK_FAILED, || self.api.update_book(id, data), |book: &Book| {
                BooksAction::UpdateBook(book.clone())
            })
            .await?;
        tracing::info!("Updated book {}", book.id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.run(DELETE_BOOK_FAILED, || self.api.delete_book(id), |_: &()| {
            BooksAction::DeleteBook(id.to_string())
        })
        .await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    pub fn select_book(&self, book: Option<Book>) {
        self.store.dispatch(BooksAction::SetSelectedBook(book));
    }

    pub fn clear_error(&self) {
        self.store.dispatch(BooksAction::SetError(None));
    }

    /// Loading on, await the call, record the outcome, loading off.
    /// Errors are stored first and then handed back to the caller.
    async fn run<T, F>(
        &self,
        fallback: &str,
        call: impl FnOnce() -> F,
        on_success: impl FnOnce(&T) -> BooksAction,
    ) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.store.dispatch(BooksAction::SetLoading(true));

        let result = call().await;
        match &result {
            Ok(value) => self.store.dispatch(on_success(value)),
            Err(e) => {
                tracing::warn!("{}: {}", fallback, e);
                self.store
                    .dispatch(BooksAction::SetError(Some(store_message(e, fallback))));
            }
        }

        self.store.dispatch(BooksAction::SetLoading(false));
        result
    }
}

/// Message recorded in the store: the backend's own words, else the fallback
fn store_message(error: &AppError, fallback: &str) -> String {
    error
        .as_api()
        .and_then(|e| e.backend_message())
        .unwrap_or(fallback)
        .to_string()
}
