//! Client side of the catalog: filter state, the observable catalog session,
//! the HTTP transport, and the shopping cart.

pub mod cart;
pub mod error;
pub mod filters;
pub mod session;
pub mod state;
pub mod transport;

pub use cart::{Cart, CartAction, CartItem, CartStore, LineItem};
pub use error::ClientError;
pub use filters::{FilterUpdate, Filters};
pub use session::CatalogSession;
pub use state::{CatalogState, FetchTicket};
pub use transport::{BookList, CatalogTransport, HttpCatalogClient};
