//! Checkout service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutServiceError {
    #[error("missing required fields")]
    MissingRequiredFields,

    #[error("checkout amount must be positive")]
    InvalidAmount,

    /// The processor did not take the payment; carries the shopper-facing reason.
    #[error("{0}")]
    PaymentFailed(String),
}
