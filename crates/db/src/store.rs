use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bookclub_pagination::PageLimit;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::filter::{BookFilter, FindOptions};
use crate::id::BookId;
use crate::model::{Book, BookPatch, NewBook};

/// Shared handle used by modules and handlers.
pub type SharedBookStore = Arc<dyn BookStore>;

/// Persistence boundary for the `books` collection.
///
/// Writes are last-write-wins: there is no version field and no transaction
/// spanning a read-modify-write across calls.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new document and return it with its generated id.
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Matching documents, sorted and windowed by `options`.
    async fn find(&self, filter: &BookFilter, options: &FindOptions)
        -> Result<Vec<Book>, StoreError>;

    /// Number of documents matching `filter`, ignoring any window.
    async fn count(&self, filter: &BookFilter) -> Result<u64, StoreError>;

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, StoreError>;

    /// Apply `patch` in place. `None` when no document has this id.
    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, StoreError>;

    /// Returns `true` when a document was removed.
    async fn delete(&self, id: &BookId) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the store; subsequent calls fail with [`StoreError::Unavailable`].
    async fn close(&self) {}
}

/// Process-local store keeping documents in insertion order.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
    closed: AtomicBool,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBookStore {
        Arc::new(Self::new())
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("store has been closed".to_string()));
        }
        Ok(())
    }
}

fn usize_or_max(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        self.ensure_open()?;
        let book = book.into_book(BookId::generate(), OffsetDateTime::now_utc());
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn find(
        &self,
        filter: &BookFilter,
        options: &FindOptions,
    ) -> Result<Vec<Book>, StoreError> {
        self.ensure_open()?;
        let books = self.books.read().await;

        let mut matches: Vec<&Book> = books.iter().filter(|book| filter.matches(book)).collect();
        // stable: ties keep insertion order
        matches.sort_by(|a, b| options.sort.compare(a, b));

        let window = matches.into_iter().skip(usize_or_max(options.skip));
        let page = match options.limit {
            PageLimit::Unlimited => window.cloned().collect(),
            PageLimit::PerPage(n) => window.take(usize_or_max(n.get())).cloned().collect(),
        };
        Ok(page)
    }

    async fn count(&self, filter: &BookFilter) -> Result<u64, StoreError> {
        self.ensure_open()?;
        let books = self.books.read().await;
        let count = books.iter().filter(|book| filter.matches(book)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == *id).cloned())
    }

    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, StoreError> {
        self.ensure_open()?;
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|book| book.id == *id).map(|book| {
            patch.apply(book);
            book.clone()
        }))
    }

    async fn delete(&self, id: &BookId) -> Result<bool, StoreError> {
        self.ensure_open()?;
        let mut books = self.books.write().await;
        let Some(index) = books.iter().position(|book| book.id == *id) else {
            return Ok(false);
        };
        books.remove(index);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
