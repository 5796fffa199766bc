//! Payment Models

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Cardholder data collected at checkout.
///
/// Wiped from memory on drop. The `Debug` output never shows the card number or CVV.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    /// Card number, digits only
    pub card_number: String,

    /// Expiry as `MMYY`
    pub card_expiry: String,

    /// Card verification value
    #[serde(rename = "cardCVV")]
    pub card_cvv: String,

    /// Name printed on the card
    pub card_holder_name: String,

    /// Billing street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_holder_address: Option<String>,

    /// Billing postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_holder_postal_code: Option<String>,
}

impl CardData {
    /// Last four digits of the card number, when available.
    pub fn last_four(&self) -> Option<&str> {
        self.card_number
            .len()
            .checked_sub(4)
            .and_then(|start| self.card_number.get(start..))
    }
}

impl Debug for CardData {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CardData")
            .field("card_number", &format_args!("****{}", self.last_four().unwrap_or("")))
            .field("card_expiry", &self.card_expiry)
            .field("card_cvv", &"***")
            .field("card_holder_name", &self.card_holder_name)
            .field("card_holder_address", &self.card_holder_address)
            .field("card_holder_postal_code", &self.card_holder_postal_code)
            .finish()
    }
}

/// A request to charge a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount in minor units (cents)
    pub amount: i64,

    /// ISO currency code, e.g. `USD`
    pub currency: String,

    /// Processor-side customer code
    pub customer_code: Option<String>,

    /// Merchant invoice number
    pub invoice_number: Option<String>,

    /// Free-form comments attached to the transaction
    pub comments: Option<String>,

    /// Card to charge
    pub card_data: CardData,
}

/// Why a payment did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFailure {
    /// The processor is not configured for this deployment.
    Configuration,

    /// The processor answered and declined the charge.
    Rejected,

    /// The processor could not be reached or answered unintelligibly.
    Transport,
}

/// Outcome of a payment attempt.
///
/// `success == true` always carries no `error`; `success == false` always carries one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Raw processor payload, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,

    #[serde(skip)]
    pub failure: Option<PaymentFailure>,
}

impl PaymentResult {
    /// An approved charge.
    pub fn approved(
        transaction_id: Option<String>,
        message: impl Into<String>,
        response: Option<Value>,
    ) -> Self {
        Self {
            success: true,
            transaction_id,
            message: Some(message.into()),
            error: None,
            response,
            failure: None,
        }
    }

    /// A failed charge.
    pub fn failed(failure: PaymentFailure, error: impl Into<String>, response: Option<Value>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: None,
            error: Some(error.into()),
            response,
            failure: Some(failure),
        }
    }
}
