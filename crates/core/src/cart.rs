//! Cart

use serde::{Deserialize, Serialize};

use crate::catalog::MonumentId;

/// A shopper's cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog identifier of the monument
    pub id: MonumentId,

    /// Number of pieces, always at least one while in a cart
    pub quantity: u32,

    /// Denormalized display title
    pub title: String,

    /// Denormalized image path
    pub image: String,

    /// Denormalized slug
    pub slug: String,
}

/// Ordered collection of cart items, one entry per monument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Adding a monument already present increases its quantity.
    ///
    /// Items with a zero quantity are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Remove the entry for the given monument, returning whether one existed.
    pub fn remove(&mut self, id: &MonumentId) -> bool {
        let before = self.items.len();

        self.items.retain(|item| &item.id != id);

        self.items.len() != before
    }

    /// Set the quantity for a monument; zero removes it.
    ///
    /// Returns `false` if the monument is not in the cart.
    pub fn set_quantity(&mut self, id: &MonumentId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }

        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total number of pieces across all entries.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
