use bookclub_db::{Book, BookId};
use bookclub_pagination::Pagination;
use serde::Serialize;

/// `GET /books`
#[derive(Debug, Clone, Serialize)]
pub struct BookListResponse {
    pub message: &'static str,
    /// Number of books on this page
    pub count: usize,
    pub books: Vec<Book>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// `GET /books/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub message: &'static str,
    pub book: Book,
}

/// `POST /books`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookResponse {
    pub message: &'static str,
    pub inserted_id: BookId,
    pub book: Book,
}

/// `PUT /books/{id}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedBookResponse {
    pub message: &'static str,
    pub updated_book: Book,
}

/// `DELETE /books/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
