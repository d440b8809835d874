//! Bookshelf service

use chrono::Utc;
use rand::Rng;

use super::validation::validate_book;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload, BookQuery, BookSummary},
    repository::Repository,
};

const ID_ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";
const ID_LENGTH: usize = 16;

const CREATE_FAILED: &str = "Gagal menambahkan buku.";
const UPDATE_FAILED: &str = "Gagal memperbarui buku.";

/// Generate a URL-safe random book identifier
fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its ID
    pub async fn create(&self, payload: &BookPayload) -> AppResult<String> {
        let fields = validate_book(payload)
            .map_err(|rule| AppError::Validation(format!("{} {}", CREATE_FAILED, rule)))?;

        let now = Utc::now();
        let id = self
            .repository
            .books_insert_unique(generate_id, |id| Book::new(id, fields, now))
            .await;

        if !self.repository.books_exists(&id).await {
            return Err(AppError::Internal("Buku gagal ditambahkan".to_string()));
        }

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    /// List books, applying at most one filter from the query
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<BookSummary>> {
        let filter = query.filter();
        let books = self.repository.books_list(&filter).await;
        tracing::debug!("Listed {} books with filter {:?}", books.len(), filter);
        Ok(books)
    }

    /// Get a book by ID
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books_get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))
    }

    /// Validate and overwrite a book
    pub async fn update(&self, id: &str, payload: &BookPayload) -> AppResult<Book> {
        let fields = validate_book(payload)
            .map_err(|rule| AppError::Validation(format!("{} {}", UPDATE_FAILED, rule)))?;

        let book = self
            .repository
            .books_update(id, fields, Utc::now())
            .await
            .ok_or_else(|| AppError::NotFound(format!("{} Id tidak ditemukan", UPDATE_FAILED)))?;

        tracing::info!("Book updated: id={}", id);
        Ok(book)
    }

    /// Delete a book by ID
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books_delete(id).await {
            return Err(AppError::NotFound(
                "Buku gagal dihapus. Id tidak ditemukan".to_string(),
            ));
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of stored books (for readiness)
    pub async fn count(&self) -> usize {
        self.repository.books_count().await
    }
}
