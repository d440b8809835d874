//! Repository layer over the in-memory book store

pub mod books;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Book;

/// Main repository struct holding the book store.
///
/// Cloning is cheap and every clone shares the same records.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl Repository {
    /// Create a repository with an empty store
    pub fn new() -> Self {
        Self::default()
    }
}
