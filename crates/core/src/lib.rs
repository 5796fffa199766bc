//! Verse
//!
//! Catalog, pricing and cart primitives for the Verse storefront checkout.

pub mod cart;
pub mod catalog;
pub mod lines;
pub mod masks;
pub mod pricing;

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, CatalogError, Monument, MonumentId};
pub use lines::{LinesError, PricingTables, ProductLine};
pub use pricing::{LineItem, OrderSummary, OrderTotals, PricingError};
