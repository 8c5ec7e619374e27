use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bookclub_pagination::PageLimit;
use regex::{Regex, RegexBuilder};

use crate::model::Book;

/// Case-insensitive substring pattern. The needle is matched literally.
#[derive(Clone)]
pub struct TextPattern {
    needle: String,
    regex: Regex,
}

impl TextPattern {
    /// Returns `None` for blank needles so they never reach the predicate.
    /// Non-blank needles are kept verbatim, surrounding whitespace included.
    pub fn new(needle: &str) -> Option<Self> {
        if needle.trim().is_empty() {
            return None;
        }

        match RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self {
                needle: needle.to_string(),
                regex,
            }),
            Err(error) => {
                tracing::warn!(%error, "ignoring text filter that cannot be compiled");
                None
            }
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.needle == other.needle
    }
}

impl fmt::Debug for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextPattern").field(&self.needle).finish()
    }
}

/// Inclusive range where either end may be open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub const fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// A document without the field only satisfies an unbounded range.
    pub fn contains(&self, value: Option<T>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Conjunctive predicate over book documents. Absent parts impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Matches title, author, genre or description
    pub search: Option<TextPattern>,
    pub genre: Option<TextPattern>,
    pub author: Option<TextPattern>,
    pub published_year: Bounds<i32>,
    pub price: Bounds<f64>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let search_hit = self.search.as_ref().map_or(true, |pattern| {
            pattern.matches(&book.title)
                || pattern.matches(&book.author)
                || pattern.matches(&book.genre)
                || book
                    .description
                    .as_deref()
                    .is_some_and(|description| pattern.matches(description))
        });

        search_hit
            && self
                .genre
                .as_ref()
                .map_or(true, |pattern| pattern.matches(&book.genre))
            && self
                .author
                .as_ref()
                .map_or(true, |pattern| pattern.matches(&book.author))
            && self.published_year.contains(book.published_year)
            && self.price.contains(Some(book.price))
    }
}

/// Fields a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Title,
    Author,
    Genre,
    PublishedYear,
    Price,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Genre => "genre",
            Self::PublishedYear => "publishedYear",
            Self::Price => "price",
        }
    }

    /// Missing values order before present ones.
    pub fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::Author => a.author.cmp(&b.author),
            Self::Genre => a.genre.cmp(&b.genre),
            Self::PublishedYear => a.published_year.cmp(&b.published_year),
            Self::Price => a.price.total_cmp(&b.price),
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "genre" => Ok(Self::Genre),
            "publishedYear" => Ok(Self::PublishedYear),
            "price" => Ok(Self::Price),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Window applied to a sorted match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: SortSpec,
    pub skip: u64,
    pub limit: PageLimit,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            sort: SortSpec::default(),
            skip: 0,
            limit: PageLimit::Unlimited,
        }
    }
}
