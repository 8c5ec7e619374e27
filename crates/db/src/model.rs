use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::id::BookId;

/// Persisted book document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-generated identifier, immutable once assigned
    #[serde(rename = "_id", alias = "id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    /// Non-negative price
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: String,
    /// Absolute or site-relative link to the book page
    #[serde(default)]
    pub book_url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
}

/// Book submission without an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub book_url: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_url: Option<String>,
}

/// A single rejected field in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: &'static str,
}

impl FieldViolation {
    const fn new(field: &'static str, error: &'static str) -> Self {
        Self { field, error }
    }
}

fn check_price(price: f64, violations: &mut Vec<FieldViolation>) {
    if !price.is_finite() || price < 0.0 {
        violations.push(FieldViolation::new("price", "must be a non-negative number"));
    }
}

fn check_required(field: &'static str, value: &str, violations: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "required"));
    }
}

impl NewBook {
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        check_required("title", &self.title, &mut violations);
        check_required("author", &self.author, &mut violations);
        check_price(self.price, &mut violations);
        violations
    }

    pub fn into_book(self, id: BookId, created_at: OffsetDateTime) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            published_year: self.published_year,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
            book_url: self.book_url,
            created_at: Some(created_at),
        }
    }
}

impl BookPatch {
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if let Some(title) = &self.title {
            check_required("title", title, &mut violations);
        }
        if let Some(author) = &self.author {
            check_required("author", author, &mut violations);
        }
        if let Some(price) = self.price {
            check_price(price, &mut violations);
        }
        violations
    }

    /// Overwrite every field present in the patch.
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(year) = self.published_year {
            book.published_year = Some(year);
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(description) = self.description {
            book.description = Some(description);
        }
        if let Some(image_url) = self.image_url {
            book.image_url = image_url;
        }
        if let Some(book_url) = self.book_url {
            book.book_url = book_url;
        }
    }
}
