//! Normalization of raw listing parameters into a [`BookQuery`].
//!
//! Parsing is permissive on purpose: malformed numbers behave as if the
//! parameter was absent, and unknown sort fields fall back to `title`.

use std::collections::HashMap;
use std::str::FromStr;

use bookclub_db::{BookFilter, Bounds, FindOptions, SortField, SortOrder, SortSpec, TextPattern};
use bookclub_pagination::{self as pagination, PageLimit};

/// Normalized listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    /// 1-based; always 1 when `limit` is unlimited
    pub page: u64,
    pub limit: PageLimit,
    pub sort: SortSpec,
    pub filter: BookFilter,
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parse_number<T: FromStr>(params: &HashMap<String, String>, name: &str) -> Option<T> {
    param(params, name).and_then(|raw| raw.parse().ok())
}

fn parse_price(params: &HashMap<String, String>, name: &str) -> Option<f64> {
    parse_number::<f64>(params, name).filter(|price| price.is_finite())
}

fn text(params: &HashMap<String, String>, name: &str) -> Option<TextPattern> {
    params.get(name).and_then(|raw| TextPattern::new(raw))
}

impl BookQuery {
    /// Build a query from the raw query-string map.
    ///
    /// `default_page_size` applies when `limit` is missing or not an integer.
    pub fn from_params(params: &HashMap<String, String>, default_page_size: u64) -> Self {
        let limit = parse_number::<i64>(params, "limit")
            .map_or(PageLimit::from(default_page_size), PageLimit::from_raw);

        let page = match limit {
            PageLimit::Unlimited => 1,
            PageLimit::PerPage(_) => parse_number::<i64>(params, "page")
                .and_then(|page| u64::try_from(page).ok())
                .filter(|&page| page >= 1)
                .unwrap_or(1),
        };

        let field = param(params, "sortBy")
            .and_then(|raw| raw.parse::<SortField>().ok())
            .unwrap_or_default();
        let order = match param(params, "order") {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        let filter = BookFilter {
            search: text(params, "search"),
            genre: text(params, "genre"),
            author: text(params, "author"),
            published_year: Bounds::new(
                parse_number(params, "minYear"),
                parse_number(params, "maxYear"),
            ),
            price: Bounds::new(
                parse_price(params, "minPrice"),
                parse_price(params, "maxPrice"),
            ),
        };

        Self {
            page,
            limit,
            sort: SortSpec { field, order },
            filter,
        }
    }

    pub fn find_options(&self) -> FindOptions {
        FindOptions {
            sort: self.sort,
            skip: pagination::skip(self.page, self.limit),
            limit: self.limit,
        }
    }
}
