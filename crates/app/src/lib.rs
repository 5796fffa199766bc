//! Checkout domain, payment processing and storefront state for Verse.

pub mod context;
pub mod domain;
pub mod payments;
pub mod storefront;

#[cfg(test)]
mod test;
