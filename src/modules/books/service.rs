use std::sync::Arc;

use tokio::sync::RwLock;

use super::clock::{Clock, SystemClock};
use super::error::BookError;
use super::id::{IdGenerator, UuidV7Ids};
use super::models::{Book, BookFilter, BookPayload, BookSummary};
use super::store::BookStore;

/// Book operations over an owned store.
///
/// Writers hold the lock across validation and mutation, so each operation
/// is atomic with respect to the others.
pub struct BookService {
    store: RwLock<BookStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl BookService {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(BookStore::new()),
            ids,
            clock,
        }
    }

    /// Number of stored books
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Validate and store a new book, returning its id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        payload.validate()?;

        let id = self.ids.generate();
        let book = Book::create(id.clone(), payload, self.clock.now());

        let mut store = self.store.write().await;
        store.insert(book)?;

        if store.get(&id).is_none() {
            return Err(BookError::MissingAfterInsert(id));
        }

        tracing::info!(book_id = %id, total = store.len(), "book added");
        Ok(id)
    }

    /// Project the books selected by `filter`, in insertion order.
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let store = self.store.read().await;
        let books: Vec<BookSummary> = store.matching(filter).map(BookSummary::from).collect();

        tracing::debug!(?filter, matched = books.len(), "books listed");
        books
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BookError::NotFound { id: id.to_string() })
    }

    /// Replace the mutable fields of an existing book.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        let mut store = self.store.write().await;
        let book = store
            .get_mut(id)
            .ok_or_else(|| BookError::NotFound { id: id.to_string() })?;

        payload.validate()?;
        book.apply(payload, self.clock.now());

        tracing::info!(book_id = %id, "book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let mut store = self.store.write().await;
        store
            .remove(id)
            .ok_or_else(|| BookError::NotFound { id: id.to_string() })?;

        tracing::info!(book_id = %id, total = store.len(), "book deleted");
        Ok(())
    }
}

impl Default for BookService {
    fn default() -> Self {
        Self::new(Arc::new(UuidV7Ids), Arc::new(SystemClock))
    }
}
