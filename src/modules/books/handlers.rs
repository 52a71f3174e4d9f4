//! HTTP handlers for the books routes

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use bookshelf_http::{AppResult, Envelope, Reply};

use super::models::{BookCreated, BookDetail, BookFilter, BookList, BookPayload, BookQuery};
use super::service::BookService;

/// `POST /books`
pub async fn create_book(
    State(books): State<Arc<BookService>>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Reply<BookCreated>> {
    let Json(payload) = payload?;
    let book_id = books.create(payload).await?;

    Ok(Reply::created(
        Envelope::success(BookCreated { book_id }).with_message("book added"),
    ))
}

/// `GET /books?reading=&finished=&name=`
pub async fn list_books(
    State(books): State<Arc<BookService>>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> AppResult<Reply<BookList>> {
    let Query(query) = query?;
    let filter = BookFilter::from(query);
    let books = books.list(&filter).await;

    Ok(Reply::ok(Envelope::success(BookList { books })))
}

/// `GET /books/{bookId}`
pub async fn get_book(
    State(books): State<Arc<BookService>>,
    Path(book_id): Path<String>,
) -> AppResult<Reply<BookDetail>> {
    let book = books.get(&book_id).await?;
    Ok(Reply::ok(Envelope::success(BookDetail { book })))
}

/// `PUT /books/{bookId}`
pub async fn update_book(
    State(books): State<Arc<BookService>>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Reply> {
    let Json(payload) = payload?;
    books.update(&book_id, payload).await?;
    Ok(Reply::ok(Envelope::done("book updated")))
}

/// `DELETE /books/{bookId}`
pub async fn delete_book(
    State(books): State<Arc<BookService>>,
    Path(book_id): Path<String>,
) -> AppResult<Reply> {
    books.delete(&book_id).await?;
    Ok(Reply::ok(Envelope::done("book deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::clock::SystemClock;
    use crate::modules::books::id::testing::{FixedId, SequentialIds};
    use crate::modules::books::routes;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<BookService>) {
        let books = Arc::new(BookService::new(
            Arc::new(SequentialIds::default()),
            Arc::new(SystemClock),
        ));
        let router = Router::new().nest("/books", routes::router(books.clone()));
        (router, books)
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create(router: &Router, body: Value) -> String {
        let (status, body) = send(router, Method::POST, "/books", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["bookId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_returns_created_envelope() {
        let (router, _) = app();

        let (status, body) = send(
            &router,
            Method::POST,
            "/books",
            Some(json!({"name": "Dune", "pageCount": 400, "readPage": 400, "reading": false})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"status": "success", "message": "book added", "data": {"bookId": "book-1"}})
        );
    }

    #[tokio::test]
    async fn create_without_name_is_rejected() {
        let (router, books) = app();

        let (status, body) = send(
            &router,
            Method::POST,
            "/books",
            Some(json!({"pageCount": 10, "readPage": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": "fail", "message": "name required"}));
        assert_eq!(books.len().await, 0);
    }

    #[tokio::test]
    async fn create_with_invalid_page_range_is_rejected() {
        let (router, books) = app();

        let (status, body) = send(
            &router,
            Method::POST,
            "/books",
            Some(json!({"name": "Dune", "pageCount": 10, "readPage": 11})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid page range");
        assert_eq!(books.len().await, 0);
    }

    #[tokio::test]
    async fn malformed_body_uses_fail_envelope() {
        let (router, _) = app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn get_returns_full_record() {
        let (router, _) = app();
        let id = create(
            &router,
            json!({
                "name": "Dune",
                "year": 1965,
                "author": "Frank Herbert",
                "summary": "Spice",
                "publisher": "Chilton",
                "pageCount": 400,
                "readPage": 100,
                "reading": true
            }),
        )
        .await;

        let (status, body) = send(&router, Method::GET, &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let book = &body["data"]["book"];
        assert_eq!(book["id"], id.as_str());
        assert_eq!(book["name"], "Dune");
        assert_eq!(book["year"], 1965);
        assert_eq!(book["author"], "Frank Herbert");
        assert_eq!(book["summary"], "Spice");
        assert_eq!(book["publisher"], "Chilton");
        assert_eq!(book["pageCount"], 400);
        assert_eq!(book["readPage"], 100);
        assert_eq!(book["finished"], false);
        assert_eq!(book["reading"], true);
        assert_eq!(book["insertedAt"], book["updatedAt"]);
    }

    #[tokio::test]
    async fn year_round_trips_as_sent() {
        let (router, _) = app();
        let id = create(
            &router,
            json!({"name": "Dune", "year": "1965", "pageCount": 10, "readPage": 1}),
        )
        .await;

        let (status, body) = send(&router, Method::GET, &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["book"]["year"], "1965");
    }

    #[tokio::test]
    async fn null_counters_are_treated_as_omitted() {
        let (router, _) = app();
        let id = create(
            &router,
            json!({"name": "Dune", "pageCount": null, "readPage": null, "reading": null}),
        )
        .await;

        let (_, body) = send(&router, Method::GET, &format!("/books/{id}"), None).await;
        let book = &body["data"]["book"];
        assert_eq!(book["pageCount"], 0);
        assert_eq!(book["readPage"], 0);
        assert_eq!(book["reading"], false);
        assert_eq!(book["finished"], true);
    }

    #[tokio::test]
    async fn colliding_id_reports_fixed_failure_message() {
        let books = Arc::new(BookService::new(
            Arc::new(FixedId("same")),
            Arc::new(SystemClock),
        ));
        let router = Router::new().nest("/books", routes::router(books.clone()));

        create(&router, json!({"name": "Dune"})).await;
        let (status, body) = send(&router, Method::POST, "/books", Some(json!({"name": "Emma"}))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "fail", "message": "book could not be added"})
        );
        assert_eq!(books.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_book_is_not_found() {
        let (router, _) = app();

        let (status, body) = send(&router, Method::GET, "/books/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "fail", "message": "book not found"}));
    }

    #[tokio::test]
    async fn list_filters_by_query() {
        let (router, _) = app();
        create(&router, json!({"name": "Harry Potter", "publisher": "Bloomsbury", "pageCount": 300, "readPage": 20, "reading": true})).await;
        create(&router, json!({"name": "Dune", "publisher": "Chilton", "pageCount": 400, "readPage": 400, "reading": false})).await;

        let (status, body) = send(&router, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "data": {"books": [
                    {"id": "book-1", "name": "Harry Potter", "publisher": "Bloomsbury"},
                    {"id": "book-2", "name": "Dune", "publisher": "Chilton"}
                ]}
            })
        );

        let (_, body) = send(&router, Method::GET, "/books?reading=1", None).await;
        assert_eq!(body["data"]["books"], json!([{"id": "book-1", "name": "Harry Potter", "publisher": "Bloomsbury"}]));

        let (_, body) = send(&router, Method::GET, "/books?reading=0", None).await;
        assert_eq!(body["data"]["books"][0]["name"], "Dune");
        assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

        let (_, body) = send(&router, Method::GET, "/books?finished=1", None).await;
        assert_eq!(body["data"]["books"][0]["name"], "Dune");

        let (_, body) = send(&router, Method::GET, "/books?name=harry", None).await;
        assert_eq!(body["data"]["books"][0]["name"], "Harry Potter");
        assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

        let (status, body) = send(&router, Method::GET, "/books?name=tolkien", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["books"], json!([]));
    }

    #[tokio::test]
    async fn update_responses() {
        let (router, _) = app();
        let id = create(&router, json!({"name": "Dune", "pageCount": 400, "readPage": 400})).await;
        let uri = format!("/books/{id}");

        let (status, body) = send(&router, Method::PUT, "/books/missing", Some(json!({"name": "Dune"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "book not found");

        let (status, body) = send(&router, Method::PUT, &uri, Some(json!({"pageCount": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name required");

        let (status, body) = send(&router, Method::PUT, &uri, Some(json!({"name": "Dune", "pageCount": 1, "readPage": 2}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid page range");

        let (status, body) = send(&router, Method::PUT, &uri, Some(json!({"name": "Dune", "pageCount": 400, "readPage": 100, "reading": true}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "message": "book updated"}));

        let (_, body) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(body["data"]["book"]["readPage"], 100);
        assert_eq!(body["data"]["book"]["finished"], true);
    }

    #[tokio::test]
    async fn delete_responses() {
        let (router, books) = app();
        let id = create(&router, json!({"name": "Dune"})).await;

        let (status, body) = send(&router, Method::DELETE, "/books/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");

        let (status, body) = send(&router, Method::DELETE, &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "message": "book deleted"}));
        assert_eq!(books.len().await, 0);
    }
}
