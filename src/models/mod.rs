//! Data models for the bookshelf

pub mod book;
pub mod response;

// Re-export commonly used types
pub use book::{Book, BookFields, BookFilter, BookPayload, BookQuery, BookSummary};
pub use response::{ApiResponse, MessageResponse, ResponseStatus};
