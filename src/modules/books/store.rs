use indexmap::IndexMap;

use super::error::BookError;
use super::models::{Book, BookFilter};

/// Insertion-ordered collection of book records keyed by id.
#[derive(Debug, Default)]
pub struct BookStore {
    books: IndexMap<String, Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a record. An id already present is never overwritten.
    pub fn insert(&mut self, book: Book) -> Result<(), BookError> {
        if self.books.contains_key(&book.id) {
            return Err(BookError::DuplicateId(book.id));
        }
        self.books.insert(book.id.clone(), book);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.get_mut(id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Records selected by `filter`, in insertion order.
    pub fn matching<'a>(&'a self, filter: &'a BookFilter) -> impl Iterator<Item = &'a Book> + 'a {
        self.iter().filter(move |book| filter.matches(book))
    }

    /// Remove a record, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Book> {
        self.books.shift_remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::BookPayload;
    use time::macros::datetime;

    fn book(id: &str, name: &str, reading: bool) -> Book {
        Book::create(
            id.to_string(),
            BookPayload {
                name: Some(name.to_string()),
                page_count: 100,
                read_page: 10,
                reading,
                ..BookPayload::default()
            },
            datetime!(2024-01-01 00:00 UTC),
        )
    }

    fn ids<'a>(books: impl Iterator<Item = &'a Book>) -> Vec<&'a str> {
        books.map(|book| book.id.as_str()).collect()
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut store = BookStore::new();
        for id in ["c", "a", "b"] {
            store.insert(book(id, id, false)).unwrap();
        }
        assert_eq!(ids(store.iter()), vec!["c", "a", "b"]);
    }

    #[test]
    fn duplicate_id_is_refused() {
        let mut store = BookStore::new();
        store.insert(book("a", "First", false)).unwrap();

        let err = store.insert(book("a", "Second", false)).unwrap_err();
        assert!(matches!(err, BookError::DuplicateId(ref id) if id == "a"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().name, "First");
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut store = BookStore::new();
        for id in ["a", "b", "c"] {
            store.insert(book(id, id, false)).unwrap();
        }

        assert!(store.remove("b").is_some());
        assert!(store.remove("b").is_none());
        assert_eq!(ids(store.iter()), vec!["a", "c"]);
    }

    #[test]
    fn matching_applies_filter() {
        let mut store = BookStore::new();
        store.insert(book("a", "Dune", true)).unwrap();
        store.insert(book("b", "Emma", false)).unwrap();
        store.insert(book("c", "Dune Messiah", true)).unwrap();

        let filter = BookFilter::Reading(true);
        assert_eq!(ids(store.matching(&filter)), vec!["a", "c"]);

        let filter = BookFilter::NameContains("emma".into());
        assert_eq!(ids(store.matching(&filter)), vec!["b"]);
    }
}
