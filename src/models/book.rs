//! Book record model and request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Book record as held in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier generated at creation
    pub id: String,
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    /// `readPage == pageCount` at the time of the last write
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a fresh record; `insertedAt` and `updatedAt` are both `now`
    pub fn new(id: String, fields: BookFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            finished: fields.is_finished(),
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping `id` and `insertedAt`
    pub fn apply(&mut self, fields: BookFields, now: DateTime<Utc>) {
        self.finished = fields.is_finished();
        self.name = fields.name;
        self.year = fields.year;
        self.author = fields.author;
        self.summary = fields.summary;
        self.publisher = fields.publisher;
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.reading = fields.reading;
        self.updated_at = now;
    }
}

/// List projection of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Submitted create/update body.
///
/// Fields stay untyped so that a wrong JSON type surfaces as the matching
/// validation message instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub year: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub summary: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub publisher: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub page_count: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub read_page: Option<Value>,
    #[schema(value_type = Option<bool>)]
    pub reading: Option<Value>,
}

/// Validated, typed mutable fields of a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
}

impl BookFields {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, anything else for the rest
    pub reading: Option<String>,
    /// `1` for finished books, anything else for the rest
    pub finished: Option<String>,
}

/// The single filter applied to a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    /// Lowercased needle
    Name(String),
    Reading(bool),
    Finished(bool),
}

impl BookQuery {
    /// Build from raw query pairs, keeping the first value of a repeated key
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Resolve the filter; `name` wins over `reading`, which wins over `finished`
    pub fn filter(&self) -> BookFilter {
        if let Some(ref name) = self.name {
            return BookFilter::Name(name.to_lowercase());
        }
        if let Some(ref reading) = self.reading {
            return BookFilter::Reading(flag(reading));
        }
        if let Some(ref finished) = self.finished {
            return BookFilter::Finished(flag(finished));
        }
        BookFilter::All
    }
}

fn flag(value: &str) -> bool {
    value == "1"
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(finished) => book.finished == *finished,
        }
    }
}

/// `data` of a successful create
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

/// `data` of a listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// `data` of a single-book fetch
#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(read_page: i64, page_count: i64) -> BookFields {
        BookFields {
            name: "Laskar Pelangi".to_string(),
            year: 2005,
            author: "Andrea Hirata".to_string(),
            summary: "Sepuluh anak Belitung".to_string(),
            publisher: "Bentang Pustaka".to_string(),
            page_count,
            read_page,
            reading: true,
        }
    }

    #[test]
    fn test_new_derives_finished() {
        let now = Utc::now();
        assert!(Book::new("a".into(), fields(529, 529), now).finished);
        assert!(!Book::new("b".into(), fields(10, 529), now).finished);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let created = Utc::now();
        let mut book = Book::new("abc".into(), fields(10, 529), created);
        let later = created + chrono::Duration::seconds(5);
        book.apply(fields(529, 529), later);

        assert_eq!(book.id, "abc");
        assert_eq!(book.inserted_at, created);
        assert_eq!(book.updated_at, later);
        assert!(book.finished);
    }

    #[test]
    fn test_serializes_camel_case() {
        let book = Book::new("abc".into(), fields(10, 529), Utc::now());
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["pageCount"], 529);
        assert_eq!(value["readPage"], 10);
        assert!(value["insertedAt"].is_string());
        assert!(value["updatedAt"].is_string());
        assert!(value.get("page_count").is_none());
    }

    #[test]
    fn test_filter_precedence() {
        let query = BookQuery {
            name: Some("Dicoding".into()),
            reading: Some("1".into()),
            finished: Some("0".into()),
        };
        assert_eq!(query.filter(), BookFilter::Name("dicoding".into()));

        let query = BookQuery {
            name: None,
            reading: Some("0".into()),
            finished: Some("1".into()),
        };
        assert_eq!(query.filter(), BookFilter::Reading(false));

        let query = BookQuery {
            finished: Some("1".into()),
            ..Default::default()
        };
        assert_eq!(query.filter(), BookFilter::Finished(true));
        assert_eq!(BookQuery::default().filter(), BookFilter::All);
    }

    #[test]
    fn test_non_one_flag_is_false() {
        let query = BookQuery {
            reading: Some("true".into()),
            ..Default::default()
        };
        assert_eq!(query.filter(), BookFilter::Reading(false));
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let book = Book::new("a".into(), fields(1, 2), Utc::now());
        assert!(BookFilter::Name("pelangi".into()).matches(&book));
        let query = BookQuery {
            name: Some("LASKAR".into()),
            ..Default::default()
        };
        assert!(query.filter().matches(&book));
        assert!(!BookFilter::Name("dicoding".into()).matches(&book));
    }

    #[test]
    fn test_from_pairs_keeps_first_value() {
        let query = BookQuery::from_pairs(vec![
            ("name".into(), "a".into()),
            ("page".into(), "2".into()),
            ("name".into(), "b".into()),
            ("reading".into(), "1".into()),
        ]);
        assert_eq!(query.name.as_deref(), Some("a"));
        assert_eq!(query.reading.as_deref(), Some("1"));
        assert_eq!(query.finished, None);
        assert_eq!(query.filter(), BookFilter::Name("a".into()));
    }

    #[test]
    fn test_from_pairs_empty() {
        assert_eq!(BookQuery::from_pairs(vec![]).filter(), BookFilter::All);
    }
}
