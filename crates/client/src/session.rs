use bookclub_db::{Book, BookPatch, NewBook};
use bookclub_pagination::PageWindow;
use tokio::sync::watch;

use crate::error::ClientError;
use crate::filters::{FilterUpdate, Filters};
use crate::state::{CatalogState, FetchTicket};
use crate::transport::CatalogTransport;

/// Observable catalog view driven by a [`CatalogTransport`].
///
/// Every state change issues a fresh list request. Requests are not cancelled
/// or debounced; responses to superseded requests are dropped when they land.
pub struct CatalogSession<T> {
    transport: T,
    state: watch::Sender<CatalogState>,
}

impl<T: CatalogTransport> CatalogSession<T> {
    pub fn new(transport: T, filters: Filters) -> Self {
        let (state, _) = watch::channel(CatalogState::new(filters));
        Self { transport, state }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn window(&self) -> PageWindow {
        self.state.borrow().window()
    }

    pub async fn update_filters(&self, update: FilterUpdate) -> CatalogState {
        let ticket = self.issue(|state| state.with_filters(&update));
        self.fetch(ticket).await
    }

    pub async fn refresh(&self) -> CatalogState {
        let ticket = self.issue(CatalogState::refetch);
        self.fetch(ticket).await
    }

    pub async fn go_to_page(&self, page: u64) -> CatalogState {
        self.update_filters(FilterUpdate::default().page(page.max(1)))
            .await
    }

    /// Advance one page; a no-op on the last page.
    pub async fn next_page(&self) -> CatalogState {
        let window = self.window();
        if !window.has_next() {
            return self.snapshot();
        }
        self.go_to_page(window.current_page + 1).await
    }

    pub async fn previous_page(&self) -> CatalogState {
        let window = self.window();
        if !window.has_previous() {
            return self.snapshot();
        }
        self.go_to_page(window.current_page - 1).await
    }

    pub async fn fetch_book_details(&self, id: &str) -> CatalogState {
        let result = self.transport.get_book(id).await;
        self.state
            .send_modify(|state| *state = state.with_current_book(result));
        self.snapshot()
    }

    pub async fn add_book(&self, book: &NewBook) -> Result<Book, ClientError> {
        let added = self.transport.add_book(book).await?;
        tracing::info!(book_id = %added.id, "book added");
        self.refresh().await;
        Ok(added)
    }

    pub async fn update_book(&self, id: &str, patch: &BookPatch) -> Result<Book, ClientError> {
        let updated = self.transport.update_book(id, patch).await?;
        self.refresh().await;
        Ok(updated)
    }

    pub async fn delete_book(&self, id: &str) -> Result<(), ClientError> {
        self.transport.delete_book(id).await?;
        tracing::info!(book_id = %id, "book deleted");
        self.refresh().await;
        Ok(())
    }

    fn issue(&self, transition: impl FnOnce(&CatalogState) -> (CatalogState, FetchTicket)) -> FetchTicket {
        let mut issued = FetchTicket::default();
        self.state.send_modify(|state| {
            let (next, ticket) = transition(state);
            *state = next;
            issued = ticket;
        });
        issued
    }

    async fn fetch(&self, ticket: FetchTicket) -> CatalogState {
        let result = self.transport.list_books(&ticket.filters).await;
        self.state
            .send_if_modified(|state| match state.receive(ticket.seq, result) {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            });
        self.snapshot()
    }
}
