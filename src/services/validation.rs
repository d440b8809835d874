//! Payload validation for book writes

use std::fmt;

use serde_json::Value;

use crate::models::{BookFields, BookPayload};

/// A rule a submitted book must satisfy, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookRule {
    Year,
    Author,
    Summary,
    Publisher,
    PageCount,
    ReadPage,
    Reading,
    Name,
    ReadPageWithinPageCount,
}

impl BookRule {
    pub fn message(&self) -> &'static str {
        match self {
            BookRule::Year => "Year wajib number dan tidak boleh 0",
            BookRule::Author => "Author wajib string dan tidak boleh kosong",
            BookRule::Summary => "Summary wajib string dan tidak boleh kosong",
            BookRule::Publisher => "Publisher wajib string dan tidak boleh kosong",
            BookRule::PageCount => "pageCount wajib number dan tidak boleh 0",
            BookRule::ReadPage => "readPage wajib number dan tidak boleh negatif",
            BookRule::Reading => "reading wajib boolean",
            BookRule::Name => "Mohon isi nama buku",
            BookRule::ReadPageWithinPageCount => "readPage tidak boleh lebih besar dari pageCount",
        }
    }
}

impl fmt::Display for BookRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn integer(value: &Option<Value>) -> Option<i64> {
    value.as_ref().and_then(Value::as_i64)
}

fn non_empty_text(value: &Option<Value>) -> Option<&str> {
    value
        .as_ref()
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Check a payload and return its typed fields, or the first rule it breaks
pub fn validate_book(payload: &BookPayload) -> Result<BookFields, BookRule> {
    let year = integer(&payload.year)
        .filter(|year| *year != 0)
        .ok_or(BookRule::Year)?;
    let author = non_empty_text(&payload.author).ok_or(BookRule::Author)?;
    let summary = non_empty_text(&payload.summary).ok_or(BookRule::Summary)?;
    let publisher = non_empty_text(&payload.publisher).ok_or(BookRule::Publisher)?;
    let page_count = integer(&payload.page_count)
        .filter(|count| *count != 0)
        .ok_or(BookRule::PageCount)?;
    let read_page = integer(&payload.read_page)
        .filter(|page| *page >= 0)
        .ok_or(BookRule::ReadPage)?;
    let reading = payload
        .reading
        .as_ref()
        .and_then(Value::as_bool)
        .ok_or(BookRule::Reading)?;
    let name = payload
        .name
        .as_ref()
        .and_then(Value::as_str)
        .ok_or(BookRule::Name)?;

    if read_page > page_count {
        return Err(BookRule::ReadPageWithinPageCount);
    }

    Ok(BookFields {
        name: name.to_string(),
        year,
        author: author.to_string(),
        summary: summary.to_string(),
        publisher: publisher.to_string(),
        page_count,
        read_page,
        reading,
    })
}
