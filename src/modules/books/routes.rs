use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookclub_db::{BookPatch, NewBook};
use bookclub_http::error::AppError;
use serde_json::json;

use super::catalog::{parse_id, Catalog};
use super::models::{
    BookListResponse, BookResponse, CreatedBookResponse, MessageResponse, UpdatedBookResponse,
};
use super::query::BookQuery;

/// Routes mounted under `/books`
pub fn router(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(catalog)
}

fn payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        AppError::validation(
            vec![json!({ "error": rejection.body_text() })],
            "Invalid book payload",
        )
    })
}

async fn list_books(
    State(catalog): State<Catalog>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<BookListResponse>, AppError> {
    let query = BookQuery::from_params(&params, catalog.default_page_size());
    let page = catalog.list(&query).await?;

    Ok(Json(BookListResponse {
        message: "Books fetched successfully",
        count: page.books.len(),
        books: page.books,
        pagination: page.pagination,
    }))
}

async fn get_book(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let book = catalog.get(&id).await?;
    Ok(Json(BookResponse {
        message: "Book fetched successfully",
        book,
    }))
}

async fn create_book(
    State(catalog): State<Catalog>,
    body: Result<Json<NewBook>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedBookResponse>), AppError> {
    let book = catalog.create(payload(body)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedBookResponse {
            message: "Book added successfully",
            inserted_id: book.id,
            book,
        }),
    ))
}

async fn update_book(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
    body: Result<Json<BookPatch>, JsonRejection>,
) -> Result<Json<UpdatedBookResponse>, AppError> {
    let id = parse_id(&id)?;
    let patch = payload(body)?;
    let updated_book = catalog.update(id, patch).await?;
    Ok(Json(UpdatedBookResponse {
        message: "Book updated successfully",
        updated_book,
    }))
}

async fn delete_book(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    catalog.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use bookclub_db::MemoryBookStore;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().nest("/books", router(Catalog::new(MemoryBookStore::shared(), 10)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn add(app: &Router, title: &str, genre: &str, price: f64) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/books",
            Some(json!({
                "title": title,
                "author": "Jane Doe",
                "genre": genre,
                "publishedYear": 2010,
                "price": price,
                "imageUrl": "/img/cover.webp",
                "bookUrl": "/books/cover"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["insertedId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let app = app();
        let id = add(&app, "History of Rome", "Historical", 12.0).await;

        let (status, body) = send(&app, Method::GET, &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Book fetched successfully");
        assert_eq!(body["book"]["_id"], id.as_str());
        assert_eq!(body["book"]["title"], "History of Rome");
    }

    #[tokio::test]
    async fn list_envelope_shape() {
        let app = app();
        for (title, price) in [("A", 5.0), ("B", 10.0), ("C", 15.0), ("D", 20.0), ("E", 25.0)] {
            add(&app, title, "Fiction", price).await;
        }
        add(&app, "Physics 101", "Science", 1.0).await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/books?genre=Fiction&sortBy=price&order=desc&page=2&limit=2",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Books fetched successfully");
        assert_eq!(body["count"], 2);
        assert_eq!(body["totalCount"], 5);
        assert_eq!(body["currentPage"], 2);
        assert_eq!(body["totalPages"], 3);
        let prices: Vec<f64> = body["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["price"].as_f64().unwrap())
            .collect();
        assert_eq!(prices, vec![15.0, 10.0]);
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let app = app();
        add(&app, "History of Rome", "Historical", 12.0).await;
        add(&app, "Physics 101", "Science", 30.0).await;

        let (_, body) = send(&app, Method::GET, "/books?search=history", None).await;
        let titles: Vec<&str> = body["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["History of Rome"]);
    }

    #[tokio::test]
    async fn empty_filters_do_not_constrain() {
        let app = app();
        add(&app, "History of Rome", "Historical", 12.0).await;
        add(&app, "Physics 101", "Science", 30.0).await;

        let (_, body) = send(
            &app,
            Method::GET,
            "/books?genre=&author=&search=&minYear=&maxPrice=abc",
            None,
        )
        .await;
        assert_eq!(body["totalCount"], 2);
    }

    #[tokio::test]
    async fn malformed_id_is_a_bad_request() {
        let app = app();
        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(&app, method, "/books/abc", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Invalid book ID format");
        }
        let (status, _) = send(&app, Method::PUT, "/books/abc", Some(json!({"price": 1.0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_id_wins_over_a_bad_body() {
        let app = app();
        let (status, body) = send(&app, Method::PUT, "/books/abc", Some(json!({"price": "free"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid book ID format");

        let (status, _) = send(&app, Method::PUT, "/books/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn signed_hex_is_not_an_id() {
        let app = app();
        let uri = "/books/+0+0+0+0+0+0+0+0+0+0+0+0";
        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Invalid book ID format");
        }
        let (status, _) = send(&app, Method::PUT, uri, Some(json!({"price": 1.0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = app();
        let uri = "/books/507f1f77bcf86cd799439011";

        let (status, body) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Book not found");

        let (status, _) = send(&app, Method::PUT, uri, Some(json!({"price": 1.0}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_then_delete() {
        let app = app();
        let id = add(&app, "Draft", "Fiction", 9.0).await;
        let uri = format!("/books/{id}");

        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"title": "Final", "price": 11.0}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Book updated successfully");
        assert_eq!(body["updatedBook"]["title"], "Final");
        assert_eq!(body["updatedBook"]["genre"], "Fiction");

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Book deleted successfully"}));

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_payloads_are_validation_errors() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/books", Some(json!({"title": "No price"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");

        let (status, body) = send(
            &app,
            Method::POST,
            "/books",
            Some(json!({"title": "Negative", "author": "A", "price": -3})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["details"][0]["field"], "price");
    }

    #[tokio::test]
    async fn store_outage_is_a_server_error() {
        let store = MemoryBookStore::shared();
        store.close().await;
        let app = Router::new().nest("/books", router(Catalog::new(store, 10)));

        let (status, body) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_error");
        assert!(body.get("books").is_none());
    }
}
