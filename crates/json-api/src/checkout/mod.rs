//! Checkout

pub(crate) mod errors;
pub(crate) mod process;
