//! Shared cart state.

use std::sync::Arc;

use tokio::sync::watch;
use verse::{Cart, CartItem, MonumentId};

/// A cart shared between every view of the storefront.
///
/// Clones observe the same cart. Subscribers are notified only when the cart
/// actually changes.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<Cart>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(Cart::new())),
        }
    }

    pub fn add(&self, item: CartItem) {
        self.state.send_if_modified(|cart| {
            let before = cart.item_count();
            cart.add(item);
            cart.item_count() != before
        });
    }

    pub fn remove(&self, id: &MonumentId) -> bool {
        self.state.send_if_modified(|cart| cart.remove(id))
    }

    pub fn set_quantity(&self, id: &MonumentId, quantity: u32) -> bool {
        self.state
            .send_if_modified(|cart| cart.set_quantity(id, quantity))
    }

    pub fn clear(&self) {
        self.state.send_if_modified(|cart| {
            if cart.is_empty() {
                return false;
            }

            cart.clear();
            true
        });
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    pub fn item_count(&self) -> u32 {
        self.state.borrow().item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Watch the cart for changes.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }
}
