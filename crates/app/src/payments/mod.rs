//! Payments

use async_trait::async_trait;
use mockall::automock;

pub mod helcim;
pub mod models;

pub use helcim::{DEFAULT_HELCIM_API_URL, HelcimConfig, HelcimError, HelcimGateway};
pub use models::{CardData, PaymentFailure, PaymentRequest, PaymentResult};

/// A card payment processor.
///
/// Implementations never error: every outcome, including misconfiguration and
/// network failure, is reported as a [`PaymentResult`].
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge a card for the requested amount.
    async fn process_payment(&self, request: PaymentRequest) -> PaymentResult;
}
