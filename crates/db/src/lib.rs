//! Book document store: entities, filter predicates, and an in-memory store
//! behind the async [`BookStore`] boundary.

pub mod error;
pub mod filter;
pub mod id;
pub mod model;
pub mod module;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use filter::{BookFilter, Bounds, FindOptions, SortField, SortOrder, SortSpec, TextPattern};
pub use id::{BookId, InvalidBookId};
pub use model::{Book, BookPatch, FieldViolation, NewBook};
pub use module::StoreModule;
pub use store::{BookStore, MemoryBookStore, SharedBookStore};
