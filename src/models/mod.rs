//! Data models for Bookshelf

pub mod book;
pub mod filter;
pub mod remote_book;

// Re-export commonly used types
pub use book::{Book, BookField, BookFormData, NumericInput};
pub use filter::{BookQuery, FilterOptions, YearRange};
pub use remote_book::{BookPayload, RemoteBook};
