//! Drives a live server through the HTTP client and session.

use bookclub_client::{CatalogSession, FilterUpdate, Filters, HttpCatalogClient};
use bookclub_db::{MemoryBookStore, NewBook, SortField, SortOrder};
use bookclub_kernel::settings::Settings;

async fn spawn_server() -> String {
    let app = bookclub_app::app(MemoryBookStore::shared(), &Settings::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn new_book(title: &str, genre: &str, price: f64) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Jane Doe".to_string(),
        genre: genre.to_string(),
        published_year: Some(2015),
        price,
        description: None,
        image_url: String::new(),
        book_url: String::new(),
    }
}

#[tokio::test]
async fn filter_sort_and_paginate_over_http() {
    let session = CatalogSession::new(HttpCatalogClient::new(spawn_server().await), Filters::default());
    for (title, price) in [("A", 5.0), ("B", 10.0), ("C", 15.0), ("D", 20.0), ("E", 25.0)] {
        session.add_book(&new_book(title, "Fiction", price)).await.unwrap();
    }
    session.add_book(&new_book("Physics", "Science", 1.0)).await.unwrap();

    let state = session
        .update_filters(
            FilterUpdate::default()
                .genre("Fiction")
                .sort(SortField::Price, SortOrder::Desc)
                .limit(2)
                .page(2),
        )
        .await;
    assert!(state.error.is_none());
    let prices: Vec<f64> = state.books.iter().map(|book| book.price).collect();
    assert_eq!(prices, vec![15.0, 10.0]);
    assert_eq!(state.pagination.total_count, 5);
    assert_eq!(state.pagination.total_pages, 3);
    assert_eq!(state.window().to_string(), "Showing 3-4 of 5");

    let state = session.update_filters(FilterUpdate::default().genre("")).await;
    assert_eq!(state.filters.page, 1);
    assert_eq!(state.pagination.total_count, 6);
}

#[tokio::test]
async fn malformed_and_missing_ids_surface_distinct_statuses() {
    let session = CatalogSession::new(HttpCatalogClient::new(spawn_server().await), Filters::default());

    let malformed = session.delete_book("abc").await.unwrap_err();
    assert_eq!(malformed.status(), Some(400));
    assert!(malformed.to_string().contains("Invalid book ID format"));

    let missing = session
        .delete_book("507f1f77bcf86cd799439011")
        .await
        .unwrap_err();
    assert_eq!(missing.status(), Some(404));

    let state = session.fetch_book_details("abc").await;
    assert!(state.current_book.is_none());
}

#[tokio::test]
async fn unreachable_server_falls_back_to_an_empty_list() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = CatalogSession::new(HttpCatalogClient::new(format!("http://{addr}")), Filters::default());
    let state = session.refresh().await;
    assert!(state.books.is_empty());
    assert!(state.error.is_some());
    assert!(!state.loading);
}
