use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers;
use super::service::BookService;

/// Books routes, relative to the module mount point.
pub fn router(books: Arc<BookService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/{bookId}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .with_state(books)
}
