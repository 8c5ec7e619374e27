//! Catalog filter selections and their merge rule.

use bookclub_db::{SortField, SortOrder};
use bookclub_pagination::PageLimit;

/// Current filter, sort, and page selection of a catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    /// `0` requests every match on one page
    pub limit: u64,
    pub page: u64,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub genre: String,
    pub author: String,
    pub search: String,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            limit: 8,
            page: 1,
            sort_by: SortField::Title,
            order: SortOrder::Asc,
            genre: String::new(),
            author: String::new(),
            search: String::new(),
            min_year: None,
            max_year: None,
            min_price: Some(0.0),
            max_price: Some(1000.0),
        }
    }
}

/// Partial change to [`Filters`]. `None` leaves a field untouched.
///
/// The nested options on range bounds distinguish "leave as is" (`None`)
/// from "clear the bound" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
    pub min_year: Option<Option<i32>>,
    pub max_year: Option<Option<i32>>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
}

impl FilterUpdate {
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort_by: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.order = Some(order);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn years(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_year = Some(min);
        self.max_year = Some(max);
        self
    }

    pub fn prices(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }
}

impl Filters {
    /// Merge `update` into a new snapshot.
    ///
    /// Unless the update names a page explicitly, the result is back on page 1:
    /// a filter or sort change must not strand the view on a page that may no
    /// longer exist.
    pub fn apply(&self, update: &FilterUpdate) -> Self {
        let update = update.clone();
        Self {
            limit: update.limit.unwrap_or(self.limit),
            page: update.page.unwrap_or(1),
            sort_by: update.sort_by.unwrap_or(self.sort_by),
            order: update.order.unwrap_or(self.order),
            genre: update.genre.unwrap_or_else(|| self.genre.clone()),
            author: update.author.unwrap_or_else(|| self.author.clone()),
            search: update.search.unwrap_or_else(|| self.search.clone()),
            min_year: update.min_year.unwrap_or(self.min_year),
            max_year: update.max_year.unwrap_or(self.max_year),
            min_price: update.min_price.unwrap_or(self.min_price),
            max_price: update.max_price.unwrap_or(self.max_price),
        }
    }

    pub fn page_limit(&self) -> PageLimit {
        PageLimit::from(self.limit)
    }

    /// Query-string pairs; empty text and unset bounds are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("page", self.page.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ];

        for (name, value) in [
            ("genre", &self.genre),
            ("author", &self.author),
            ("search", &self.search),
        ] {
            if !value.trim().is_empty() {
                pairs.push((name, value.clone()));
            }
        }

        let bounds = [
            ("minYear", self.min_year.map(|year| year.to_string())),
            ("maxYear", self.max_year.map(|year| year.to_string())),
            ("minPrice", self.min_price.map(|price| price.to_string())),
            ("maxPrice", self.max_price.map(|price| price.to_string())),
        ];
        pairs.extend(
            bounds
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value))),
        );

        pairs
    }
}
