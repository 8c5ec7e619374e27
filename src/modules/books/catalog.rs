//! Catalog operations over the book store.

use anyhow::Context;
use bookclub_db::{
    Book, BookId, BookPatch, BookStore, FieldViolation, NewBook, SharedBookStore, StoreError,
};
use bookclub_http::error::AppError;
use bookclub_pagination::Pagination;

use super::query::BookQuery;

/// One window of a listing plus the totals it was cut from.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

/// Run the windowed fetch and the total count concurrently.
///
/// Both use the same predicate; if either fails the whole listing fails.
pub async fn execute(store: &dyn BookStore, query: &BookQuery) -> Result<BookPage, StoreError> {
    let options = query.find_options();
    let (books, total_count) =
        tokio::try_join!(store.find(&query.filter, &options), store.count(&query.filter))?;

    Ok(BookPage {
        books,
        pagination: Pagination::new(total_count, query.limit, query.page),
    })
}

/// Malformed ids are rejected before the store or the request body is consulted.
pub fn parse_id(raw: &str) -> Result<BookId, AppError> {
    BookId::parse(raw).map_err(|_| AppError::bad_request("Invalid book ID format"))
}

fn reject_violations(violations: Vec<FieldViolation>) -> Result<(), AppError> {
    if violations.is_empty() {
        return Ok(());
    }
    let details = violations
        .into_iter()
        .filter_map(|violation| serde_json::to_value(violation).ok())
        .collect();
    Err(AppError::validation(details, "Invalid book payload"))
}

/// Handler-facing service: validates ids and payloads, then talks to the store.
#[derive(Clone)]
pub struct Catalog {
    store: SharedBookStore,
    default_page_size: u64,
}

impl Catalog {
    pub fn new(store: SharedBookStore, default_page_size: u64) -> Self {
        Self {
            store,
            default_page_size,
        }
    }

    pub fn default_page_size(&self) -> u64 {
        self.default_page_size
    }

    pub async fn list(&self, query: &BookQuery) -> Result<BookPage, AppError> {
        let page = execute(self.store.as_ref(), query)
            .await
            .context("Error fetching books")?;

        tracing::debug!(
            total_count = page.pagination.total_count,
            current_page = page.pagination.current_page,
            returned = page.books.len(),
            "listed books"
        );
        Ok(page)
    }

    pub async fn get(&self, raw_id: &str) -> Result<Book, AppError> {
        let id = parse_id(raw_id)?;
        self.store
            .find_by_id(&id)
            .await
            .context("Error fetching book")?
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    pub async fn create(&self, book: NewBook) -> Result<Book, AppError> {
        reject_violations(book.validate())?;
        let book = self.store.insert(book).await.context("Error adding book")?;
        tracing::info!(book_id = %book.id, title = %book.title, "book added");
        Ok(book)
    }

    pub async fn update(&self, id: BookId, patch: BookPatch) -> Result<Book, AppError> {
        reject_violations(patch.validate())?;
        let book = self
            .store
            .update(&id, patch)
            .await
            .context("Error updating book")?
            .ok_or_else(|| AppError::not_found("Book not found"))?;
        tracing::info!(book_id = %id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), AppError> {
        let id = parse_id(raw_id)?;
        let deleted = self.store.delete(&id).await.context("Error deleting book")?;
        if !deleted {
            return Err(AppError::not_found("Book not found"));
        }
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use bookclub_db::MemoryBookStore;

    fn fiction(title: &str, price: f64) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Anon".to_string(),
            genre: "Fiction".to_string(),
            published_year: Some(2001),
            price,
            description: None,
            image_url: String::new(),
            book_url: String::new(),
        }
    }

    async fn catalog_with_fiction() -> Catalog {
        let catalog = Catalog::new(MemoryBookStore::shared(), 10);
        for (title, price) in [("One", 5.0), ("Two", 10.0), ("Three", 15.0), ("Four", 20.0), ("Five", 25.0)] {
            catalog.create(fiction(title, price)).await.unwrap();
        }
        catalog
    }

    fn query(pairs: &[(&str, &str)]) -> BookQuery {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BookQuery::from_params(&params, 10)
    }

    #[tokio::test]
    async fn second_page_sorted_by_price_descending() {
        let catalog = catalog_with_fiction().await;
        let page = catalog
            .list(&query(&[
                ("genre", "Fiction"),
                ("sortBy", "price"),
                ("order", "desc"),
                ("page", "2"),
                ("limit", "2"),
            ]))
            .await
            .unwrap();

        let prices: Vec<f64> = page.books.iter().map(|book| book.price).collect();
        assert_eq!(prices, vec![15.0, 10.0]);
        assert_eq!(page.pagination.total_count, 5);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.current_page, 2);
    }

    #[tokio::test]
    async fn zero_limit_returns_all_matches() {
        let catalog = catalog_with_fiction().await;
        let page = catalog.list(&query(&[("limit", "0"), ("page", "3")])).await.unwrap();
        assert_eq!(page.books.len(), 5);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.current_page, 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_but_counted() {
        let catalog = catalog_with_fiction().await;
        let page = catalog.list(&query(&[("page", "9"), ("limit", "2")])).await.unwrap();
        assert!(page.books.is_empty());
        assert_eq!(page.pagination.total_count, 5);
    }

    #[tokio::test]
    async fn malformed_and_missing_ids_are_distinct() {
        let catalog = catalog_with_fiction().await;

        let malformed = catalog.delete("abc").await.unwrap_err();
        assert!(matches!(malformed, AppError::BadRequest { .. }));

        let missing = catalog.delete(&BookId::generate().to_string()).await.unwrap_err();
        assert!(matches!(missing, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn negative_price_is_rejected_before_the_store() {
        let catalog = Catalog::new(MemoryBookStore::shared(), 10);
        let error = catalog.create(fiction("Cheap", -1.0)).await.unwrap_err();
        assert!(matches!(error, AppError::Validation { .. }));
        assert!(catalog.list(&query(&[])).await.unwrap().books.is_empty());
    }

    #[tokio::test]
    async fn unavailable_store_fails_the_listing() {
        let store = MemoryBookStore::shared();
        store.close().await;
        let catalog = Catalog::new(store, 10);

        let error = catalog.list(&query(&[])).await.unwrap_err();
        assert!(matches!(error, AppError::Internal(_)));
    }
}
