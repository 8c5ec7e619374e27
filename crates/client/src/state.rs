//! Catalog view state as immutable snapshots with pure transitions.
//!
//! Every transition that needs fresh data hands back a [`FetchTicket`]. The
//! ticket's sequence number is the only one [`CatalogState::receive`] will
//! accept, so a slow response to a superseded request can never overwrite a
//! newer one.

use bookclub_db::Book;
use bookclub_pagination::{PageLimit, PageWindow, Pagination};

use crate::error::ClientError;
use crate::filters::{FilterUpdate, Filters};
use crate::transport::BookList;

/// A list request that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchTicket {
    pub seq: u64,
    pub filters: Filters,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    pub filters: Filters,
    pub books: Vec<Book>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
    pub current_book: Option<Book>,
    latest_seq: u64,
    /// Limit of the request that produced `pagination`
    shown_limit: Option<PageLimit>,
}

impl CatalogState {
    pub fn new(filters: Filters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Sequence number of the most recently issued list request.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Merge a filter change and issue a fetch for it.
    pub fn with_filters(&self, update: &FilterUpdate) -> (Self, FetchTicket) {
        let mut next = self.clone();
        next.filters = self.filters.apply(update);
        next.issue()
    }

    /// Issue a fetch for the current filters unchanged.
    pub fn refetch(&self) -> (Self, FetchTicket) {
        self.clone().issue()
    }

    fn issue(mut self) -> (Self, FetchTicket) {
        self.latest_seq += 1;
        self.loading = true;
        let ticket = FetchTicket {
            seq: self.latest_seq,
            filters: self.filters.clone(),
        };
        (self, ticket)
    }

    /// Apply the response to request `seq`.
    ///
    /// Returns `None` when a later request has been issued since; the caller
    /// keeps its current snapshot. Failures reset the list to empty.
    pub fn receive(&self, seq: u64, result: Result<BookList, ClientError>) -> Option<Self> {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale catalog response");
            return None;
        }

        let mut next = self.clone();
        next.loading = false;
        next.shown_limit = Some(self.filters.page_limit());
        match result {
            Ok(list) => {
                next.books = list.books;
                next.pagination = list.pagination;
                next.error = None;
            }
            Err(error) => {
                tracing::error!(error = %error, "error fetching books");
                next.books = Vec::new();
                next.pagination = Pagination::default();
                next.error = Some(error.to_string());
            }
        }
        Some(next)
    }

    /// Record the outcome of a detail fetch; any failure clears the current book.
    pub fn with_current_book(&self, result: Result<Book, ClientError>) -> Self {
        let mut next = self.clone();
        next.current_book = match result {
            Ok(book) => Some(book),
            Err(error) => {
                tracing::error!(error = %error, "error fetching book details");
                None
            }
        };
        next
    }

    /// Display window for the current page, using the limit that produced it
    /// rather than one still in flight.
    pub fn window(&self) -> PageWindow {
        let limit = self
            .shown_limit
            .unwrap_or_else(|| self.filters.page_limit());
        PageWindow::from_pagination(&self.pagination, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(total: u64, page: u64, titles: &[&str]) -> BookList {
        let books = titles
            .iter()
            .map(|title| {
                serde_json::from_value(serde_json::json!({
                    "_id": "507f1f77bcf86cd799439011",
                    "title": title,
                    "author": "Anon",
                    "price": 1.0
                }))
                .unwrap()
            })
            .collect::<Vec<Book>>();
        BookList {
            message: "Books fetched successfully".to_string(),
            count: books.len(),
            books,
            pagination: Pagination {
                total_count: total,
                current_page: page,
                total_pages: total.div_ceil(8).max(1),
            },
        }
    }

    fn failure() -> ClientError {
        ClientError::Status {
            status: 500,
            message: "Error fetching books".to_string(),
        }
    }

    #[test]
    fn filter_change_issues_a_new_sequence() {
        let state = CatalogState::default();
        let (state, first) = state.with_filters(&FilterUpdate::default().genre("Fiction"));
        let (state, second) = state.refetch();

        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
        assert_eq!(second.filters.genre, "Fiction");
        assert!(state.loading);
    }

    #[test]
    fn stale_response_is_discarded() {
        let (state, fiction) =
            CatalogState::default().with_filters(&FilterUpdate::default().genre("Fiction"));
        let (state, all) = state.with_filters(&FilterUpdate::default().genre(""));

        let state = state.receive(all.seq, Ok(list(2, 1, &["A", "B"]))).unwrap();
        assert!(state.receive(fiction.seq, Ok(list(1, 1, &["F"]))).is_none());
        assert_eq!(state.books.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn failure_falls_back_to_empty() {
        let (state, ticket) = CatalogState::default().refetch();
        let state = state.receive(ticket.seq, Ok(list(3, 1, &["A", "B", "C"]))).unwrap();

        let (state, ticket) = state.refetch();
        let state = state.receive(ticket.seq, Err(failure())).unwrap();
        assert!(state.books.is_empty());
        assert_eq!(state.pagination, Pagination::default());
        assert!(state.error.is_some());
    }

    #[test]
    fn detail_failure_clears_current_book() {
        let book = list(1, 1, &["Dune"]).books.remove(0);
        let state = CatalogState::default().with_current_book(Ok(book));
        assert!(state.current_book.is_some());

        let state = state.with_current_book(Err(failure()));
        assert!(state.current_book.is_none());
    }

    #[test]
    fn window_uses_filter_limit() {
        let (state, ticket) = CatalogState::default().refetch();
        let state = state.receive(ticket.seq, Ok(list(11, 2, &["I", "J", "K"]))).unwrap();

        let window = state.window();
        assert_eq!((window.display_start, window.display_end), (9, 11));
        assert_eq!(window.to_string(), "Showing 9-11 of 11");
    }

    #[test]
    fn window_ignores_a_limit_still_in_flight() {
        let (state, ticket) = CatalogState::default().refetch();
        let state = state.receive(ticket.seq, Ok(list(20, 2, &["I", "J"]))).unwrap();

        let (pending, _) = state.with_filters(&FilterUpdate::default().limit(0));
        assert!(pending.loading);
        assert_eq!(pending.window(), state.window());
        assert_eq!(pending.window().to_string(), "Showing 9-16 of 20");
        assert!(pending.window().has_next());
    }
}
