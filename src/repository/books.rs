//! Book domain methods on Repository

use chrono::{DateTime, Utc};

use super::Repository;
use crate::models::{Book, BookFields, BookFilter, BookSummary};

impl Repository {
    /// List books matching the filter, projected, in insertion order
    pub async fn books_list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    /// Get a book by ID
    pub async fn books_get_by_id(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|book| book.id == id).cloned()
    }

    /// Whether a book with this ID is stored
    pub async fn books_exists(&self, id: &str) -> bool {
        self.books.read().await.iter().any(|book| book.id == id)
    }

    /// Append a book at the end of the store
    pub async fn books_insert(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Draw IDs until one is free, then append the book built from it.
    ///
    /// The check and the push happen under one write guard.
    pub async fn books_insert_unique(
        &self,
        mut next_id: impl FnMut() -> String,
        build: impl FnOnce(String) -> Book,
    ) -> String {
        let mut books = self.books.write().await;
        let id = loop {
            let candidate = next_id();
            if !books.iter().any(|book| book.id == candidate) {
                break candidate;
            }
        };
        books.push(build(id.clone()));
        id
    }

    /// Overwrite the mutable fields of a book; `None` if the ID is unknown
    pub async fn books_update(
        &self,
        id: &str,
        fields: BookFields,
        now: DateTime<Utc>,
    ) -> Option<Book> {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|book| book.id == id)?;
        book.apply(fields, now);
        Some(book.clone())
    }

    /// Remove a book, keeping the order of the others; `false` if the ID is unknown
    pub async fn books_delete(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of stored books
    pub async fn books_count(&self) -> usize {
        self.books.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, read_page: i64, reading: bool) -> BookFields {
        BookFields {
            name: name.to_string(),
            year: 2010,
            author: "John Doe".to_string(),
            summary: "Lorem ipsum dolor sit amet".to_string(),
            publisher: "Dicoding Indonesia".to_string(),
            page_count: 100,
            read_page,
            reading,
        }
    }

    async fn seeded() -> Repository {
        let repository = Repository::new();
        let now = Utc::now();
        for (id, name, read_page, reading) in [
            ("a", "Buku A", 100, false),
            ("b", "Kelas Dicoding", 25, true),
            ("c", "Buku C", 0, false),
        ] {
            let book = Book::new(id.into(), fields(name, read_page, reading), now);
            repository.books_insert(book).await;
        }
        repository
    }

    fn ids(summaries: &[BookSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_all_in_insertion_order() {
        let repository = seeded().await;
        let all = repository.books_list(&BookFilter::All).await;
        assert_eq!(ids(&all), vec!["a", "b", "c"]);
        assert_eq!(all[0].publisher, "Dicoding Indonesia");
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repository = seeded().await;
        let by_name = repository.books_list(&BookFilter::Name("dicoding".into())).await;
        assert_eq!(ids(&by_name), vec!["b"]);

        let reading = repository.books_list(&BookFilter::Reading(true)).await;
        assert_eq!(ids(&reading), vec!["b"]);

        let finished = repository.books_list(&BookFilter::Finished(true)).await;
        assert_eq!(ids(&finished), vec!["a"]);

        let unfinished = repository.books_list(&BookFilter::Finished(false)).await;
        assert_eq!(ids(&unfinished), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_get_and_exists() {
        let repository = seeded().await;
        let name = repository.books_get_by_id("b").await.map(|b| b.name);
        assert_eq!(name, Some("Kelas Dicoding".into()));
        assert!(repository.books_get_by_id("zzz").await.is_none());
        assert!(repository.books_exists("c").await);
        assert!(!repository.books_exists("zzz").await);
    }

    #[tokio::test]
    async fn test_insert_unique_skips_taken_ids() {
        let repository = seeded().await;
        let mut candidates = vec!["d", "b", "a"];
        let now = Utc::now();
        let id = repository
            .books_insert_unique(
                || candidates.pop().unwrap_or_default().to_string(),
                |id| Book::new(id, fields("Buku D", 1, true), now),
            )
            .await;

        assert_eq!(id, "d");
        assert!(candidates.is_empty());
        let all = repository.books_list(&BookFilter::All).await;
        assert_eq!(ids(&all), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repository = seeded().await;
        let updated = repository
            .books_update("zzz", fields("X", 1, true), Utc::now())
            .await;
        assert!(updated.is_none());
        assert_eq!(repository.books_count().await, 3);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repository = seeded().await;
        let updated = repository
            .books_update("c", fields("Buku C Revisi", 100, true), Utc::now())
            .await
            .unwrap();
        assert_eq!(updated.name, "Buku C Revisi");
        assert!(updated.finished);
        assert_eq!(repository.books_get_by_id("c").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete_keeps_order() {
        let repository = seeded().await;
        assert!(repository.books_delete("b").await);
        assert!(!repository.books_delete("b").await);
        let all = repository.books_list(&BookFilter::All).await;
        assert_eq!(ids(&all), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let repository = Repository::new();
        let clone = repository.clone();
        clone.books_insert(Book::new("x".into(), fields("X", 1, false), Utc::now())).await;
        assert_eq!(repository.books_count().await, 1);
    }
}
