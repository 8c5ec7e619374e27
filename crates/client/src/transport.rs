//! Transport to the `/books` REST surface.

use async_trait::async_trait;
use bookclub_db::{Book, BookPatch, NewBook};
use bookclub_pagination::Pagination;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;
use crate::filters::Filters;

/// Body of `GET /books`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookList {
    pub message: String,
    pub count: usize,
    pub books: Vec<Book>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Deserialize)]
struct BookEnvelope {
    book: Book,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedEnvelope {
    updated_book: Book,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: String,
}

/// What a catalog view needs from the server.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn list_books(&self, filters: &Filters) -> Result<BookList, ClientError>;
    async fn get_book(&self, id: &str) -> Result<Book, ClientError>;
    async fn add_book(&self, book: &NewBook) -> Result<Book, ClientError>;
    async fn update_book(&self, id: &str, patch: &BookPatch) -> Result<Book, ClientError>;
    async fn delete_book(&self, id: &str) -> Result<(), ClientError>;
}

/// reqwest-backed [`CatalogTransport`].
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn books_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    fn book_url(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, id)
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<MessageEnvelope>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn transport_error(url: &str) -> impl FnOnce(reqwest::Error) -> ClientError + '_ {
    move |source| ClientError::Transport {
        url: url.to_string(),
        source,
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalogClient {
    async fn list_books(&self, filters: &Filters) -> Result<BookList, ClientError> {
        let url = self.books_url();
        tracing::debug!(%url, ?filters, "fetching books");
        let response = self
            .http
            .get(&url)
            .query(&filters.query_pairs())
            .send()
            .await
            .map_err(transport_error(&url))?;
        Self::decode(&url, response).await
    }

    async fn get_book(&self, id: &str) -> Result<Book, ClientError> {
        let url = self.book_url(id);
        let response = self.http.get(&url).send().await.map_err(transport_error(&url))?;
        Self::decode::<BookEnvelope>(&url, response)
            .await
            .map(|body| body.book)
    }

    async fn add_book(&self, book: &NewBook) -> Result<Book, ClientError> {
        let url = self.books_url();
        let response = self
            .http
            .post(&url)
            .json(book)
            .send()
            .await
            .map_err(transport_error(&url))?;
        Self::decode::<BookEnvelope>(&url, response)
            .await
            .map(|body| body.book)
    }

    async fn update_book(&self, id: &str, patch: &BookPatch) -> Result<Book, ClientError> {
        let url = self.book_url(id);
        let response = self
            .http
            .put(&url)
            .json(patch)
            .send()
            .await
            .map_err(transport_error(&url))?;
        Self::decode::<UpdatedEnvelope>(&url, response)
            .await
            .map(|body| body.updated_book)
    }

    async fn delete_book(&self, id: &str) -> Result<(), ClientError> {
        let url = self.book_url(id);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(transport_error(&url))?;
        Self::decode::<MessageEnvelope>(&url, response)
            .await
            .map(|_| ())
    }
}
