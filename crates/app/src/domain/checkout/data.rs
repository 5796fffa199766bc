//! Checkout Data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use verse::{LineItem, MonumentId, ProductLine};

use crate::payments::CardData;

/// Checkout submission as sent by the storefront.
///
/// Required fields are optional here so that a structurally valid but incomplete
/// submission can be told apart from a malformed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckoutRequest {
    /// Order total in cents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_data: Option<CardData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,

    #[serde(default)]
    pub items: Vec<OrderLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_line: Option<ProductLine>,
}

/// Shopper contact and shipping details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub full_name: String,

    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zip: String,

    #[serde(default)]
    pub country: String,
}

/// A priced order line, echoed back on the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: MonumentId,

    pub title: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub image: String,

    pub quantity: u32,

    /// Unit price in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Line total in major units
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl From<&LineItem> for OrderLine {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.item.id.clone(),
            title: line.item.title.clone(),
            slug: line.item.slug.clone(),
            image: line.item.image.clone(),
            quantity: line.item.quantity,
            unit_price: Decimal::new(line.unit_price.to_minor_units(), 2),
            total_price: Decimal::new(line.total_price.to_minor_units(), 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_storefront_payload() -> TestResult {
        let request: CheckoutRequest = serde_json::from_value(json!({
            "amount": 13311,
            "currency": "USD",
            "invoiceNumber": "ORDER-1",
            "cardData": {
                "cardNumber": "4111111111111111",
                "cardExpiry": "1229",
                "cardCVV": "123",
                "cardHolderName": "Patti Smith"
            },
            "billing": { "fullName": "Patti Smith", "email": "patti@example.com" },
            "items": [{
                "id": "lennon-cut",
                "title": "Lennon Cut",
                "quantity": 2,
                "unitPrice": 39.6,
                "totalPrice": 79.2
            }],
            "productLine": "usa"
        }))?;

        assert_eq!(request.amount, Some(133_11));
        assert_eq!(request.product_line, Some(ProductLine::Usa));
        assert_eq!(
            request.items.first().map(|line| line.total_price),
            Some(Decimal::new(792, 1))
        );
        assert_eq!(
            request.billing.map(|billing| billing.country),
            Some(String::new())
        );

        Ok(())
    }

    #[test]
    fn missing_fields_decode_as_none() -> TestResult {
        let request: CheckoutRequest = serde_json::from_value(json!({ "currency": "USD" }))?;

        assert_eq!(request.amount, None);
        assert!(request.card_data.is_none());
        assert!(request.items.is_empty());

        Ok(())
    }

    #[test]
    fn rejects_unknown_fields_and_wrong_types() {
        assert!(serde_json::from_value::<CheckoutRequest>(json!({ "amount": "lots" })).is_err());
        assert!(serde_json::from_value::<CheckoutRequest>(json!({ "total": 5 })).is_err());
    }
}
