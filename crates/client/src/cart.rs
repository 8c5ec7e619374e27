//! Shopping cart as a reducer over immutable snapshots.

use bookclub_db::Book;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// What gets added to a cart: a denormalized copy of the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub price: f64,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

impl From<&Book> for LineItem {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author_name: book.author.clone(),
            price: book.price,
            image_url: book.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: LineItem,
    /// Always at least 1
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds one unit; an existing line for the same id is incremented instead.
    Add(LineItem),
    /// Sets the quantity, clamped to at least 1.
    UpdateQuantity { id: String, quantity: i64 },
    Increment(String),
    /// Floors at 1.
    Decrement(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Recomputed from the current lines on every call.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn reduce(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add(item) => match self.line_mut(&item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => self.items.push(CartItem { item, quantity: 1 }),
            },
            CartAction::UpdateQuantity { id, quantity } => {
                if let Some(line) = self.line_mut(&id) {
                    line.quantity = clamp_quantity(quantity);
                }
            }
            CartAction::Increment(id) => {
                if let Some(line) = self.line_mut(&id) {
                    line.quantity = line.quantity.saturating_add(1);
                }
            }
            CartAction::Decrement(id) => {
                if let Some(line) = self.line_mut(&id) {
                    line.quantity = line.quantity.saturating_sub(1).max(1);
                }
            }
            CartAction::Remove(id) => self.items.retain(|line| line.item.id != id),
            CartAction::Clear => self.items.clear(),
        }
        self
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|line| line.item.id == id)
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// Process-local observable cart.
pub struct CartStore {
    state: watch::Sender<Cart>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Cart::default());
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: CartAction) -> Cart {
        tracing::debug!(?action, "cart action");
        self.state
            .send_modify(|cart| *cart = std::mem::take(cart).reduce(action));
        self.snapshot()
    }

    pub fn add_to_cart(&self, item: LineItem) -> Cart {
        self.dispatch(CartAction::Add(item))
    }

    pub fn update_quantity(&self, id: impl Into<String>, quantity: i64) -> Cart {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.into(),
            quantity,
        })
    }

    pub fn increment(&self, id: impl Into<String>) -> Cart {
        self.dispatch(CartAction::Increment(id.into()))
    }

    pub fn decrement(&self, id: impl Into<String>) -> Cart {
        self.dispatch(CartAction::Decrement(id.into()))
    }

    pub fn remove_from_cart(&self, id: impl Into<String>) -> Cart {
        self.dispatch(CartAction::Remove(id.into()))
    }

    pub fn clear_cart(&self) -> Cart {
        self.dispatch(CartAction::Clear)
    }
}
