use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use super::error::BookError;

/// A book record as kept on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Generated identifier, never reused
    pub id: String,
    pub name: String,
    /// Free-form, kept exactly as the client sent it
    pub year: Option<Value>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Set once at creation from `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record from an already validated payload.
    pub fn create(id: String, payload: BookPayload, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished: payload.page_count == payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `finished` keeps its creation value.
    pub fn apply(&mut self, payload: BookPayload, now: OffsetDateTime) {
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }
}

/// Request body for creating or replacing a book.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<Value>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading: bool,
}

/// Treat an explicit `null` like an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl BookPayload {
    /// Check the name first, then the page range.
    pub fn validate(&self) -> Result<(), BookError> {
        if self.name.as_deref().map_or(true, str::is_empty) {
            return Err(BookError::NameRequired);
        }

        if self.read_page > self.page_count {
            return Err(BookError::InvalidPageRange {
                read_page: self.read_page,
                page_count: self.page_count,
            });
        }

        Ok(())
    }
}

/// List projection of a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
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

/// Raw list query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub reading: Option<String>,
    pub finished: Option<String>,
    pub name: Option<String>,
}

/// Which books a list request selects. Built from [`BookQuery`] with
/// `reading` taking precedence over `finished`, and `finished` over `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Reading(bool),
    Finished(bool),
    /// Lowercased needle
    NameContains(String),
    All,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::NameContains(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::All => true,
        }
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        if let Some(reading) = query.reading {
            BookFilter::Reading(parse_flag(&reading))
        } else if let Some(finished) = query.finished {
            BookFilter::Finished(parse_flag(&finished))
        } else if let Some(name) = query.name {
            BookFilter::NameContains(name.to_lowercase())
        } else {
            BookFilter::All
        }
    }
}

/// `true`/`false` in any case, otherwise any non-zero integer is true.
/// Anything unparseable reads as false.
fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        return true;
    }
    if raw.eq_ignore_ascii_case("false") {
        return false;
    }
    raw.parse::<i64>().map_or(false, |value| value != 0)
}

/// `data` of a successful create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

/// `data` of a list response.
#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// `data` of a single-book response.
#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}
