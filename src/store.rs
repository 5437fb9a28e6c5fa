//! In-memory catalog state.
//!
//! [`BooksState`] only changes through [`BooksAction`] transitions. A
//! [`BookStore`] wraps one state in a `watch` channel: each transition is applied
//! under the channel lock and published as a whole, so readers never observe a
//! half-applied change. Stores are created explicitly; there is no global one.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::Book;

/// Snapshot of the catalog as seen by the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooksState {
    pub books: Vec<Book>,
    pub selected_book: Option<Book>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Named state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooksAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetBooks(Vec<Book>),
    /// Appends without checking for an existing id
    AddBook(Book),
    UpdateBook(Book),
    DeleteBook(String),
    SetSelectedBook(Option<Book>),
}

impl BooksAction {
    pub fn name(&self) -> &'static str {
        match self {
            BooksAction::SetLoading(_) => "set_loading",
            BooksAction::SetError(_) => "set_error",
            BooksAction::SetBooks(_) => "set_books",
            BooksAction::AddBook(_) => "add_book",
            BooksAction::UpdateBook(_) => "update_book",
            BooksAction::DeleteBook(_) => "delete_book",
            BooksAction::SetSelectedBook(_) => "set_selected_book",
        }
    }
}

impl BooksState {
    /// Apply one transition in place
    pub fn reduce(&mut self, action: BooksAction) {
        match action {
            BooksAction::SetLoading(loading) => self.loading = loading,
            BooksAction::SetError(error) => {
                self.error = error;
                self.loading = false;
            }
            BooksAction::SetBooks(books) => {
                self.books = books;
                self.loading = false;
                self.error = None;
            }
            BooksAction::AddBook(book) => self.books.push(book),
            BooksAction::UpdateBook(book) => {
                for slot in self.books.iter_mut().filter(|b| b.id == book.id) {
                    *slot = book.clone();
                }
            }
            BooksAction::DeleteBook(id) => self.books.retain(|b| b.id != id),
            BooksAction::SetSelectedBook(book) => self.selected_book = book,
        }
    }
}

/// Shared handle to one catalog state
#[derive(Clone)]
pub struct BookStore {
    state: Arc<watch::Sender<BooksState>>,
}

impl BookStore {
    /// Fresh store in the initial state
    pub fn new() -> Self {
        Self::with_state(BooksState::default())
    }

    pub fn with_state(state: BooksState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { state: Arc::new(tx) }
    }

    /// Apply a transition and notify subscribers
    pub fn dispatch(&self, action: BooksAction) {
        tracing::debug!(action = action.name(), "Store transition");
        self.state.send_modify(|state| state.reduce(action));
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> BooksState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every transition
    pub fn subscribe(&self) -> watch::Receiver<BooksState> {
        self.state.subscribe()
    }

    pub fn books(&self) -> Vec<Book> {
        self.state.borrow().books.clone()
    }

    pub fn selected_book(&self) -> Option<Book> {
        self.state.borrow().selected_book.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Look up a book of the current collection by id
    pub fn find(&self, id: &str) -> Option<Book> {
        self.state.borrow().books.iter().find(|b| b.id == id).cloned()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
