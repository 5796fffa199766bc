//! Test Helpers

use rust_decimal::Decimal;
use verse::{Catalog, Monument, MonumentId, ProductLine};

use crate::{
    domain::checkout::data::{Billing, CheckoutRequest, OrderLine},
    payments::CardData,
};

pub(crate) fn card_data() -> CardData {
    CardData {
        card_number: "4111111111111111".to_string(),
        card_expiry: "1229".to_string(),
        card_cvv: "123".to_string(),
        card_holder_name: "Patti Smith".to_string(),
        card_holder_address: Some("315 Bowery".to_string()),
        card_holder_postal_code: Some("10003".to_string()),
    }
}

pub(crate) fn billing() -> Billing {
    Billing {
        full_name: "Patti Smith".to_string(),
        email: "patti@example.com".to_string(),
        phone: "212-555-0100".to_string(),
        address: "315 Bowery".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip: "10003".to_string(),
        country: "US".to_string(),
    }
}

pub(crate) fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        amount: Some(43_07),
        currency: Some("USD".to_string()),
        customer_code: None,
        invoice_number: Some("ORDER-1".to_string()),
        comments: Some("1 item(s) - standard line".to_string()),
        card_data: Some(card_data()),
        billing: Some(billing()),
        items: vec![OrderLine {
            id: MonumentId::new("lennon-cut"),
            title: "Lennon Cut".to_string(),
            slug: "lennon-cut".to_string(),
            image: "/monuments/lennon-cut.png".to_string(),
            quantity: 1,
            unit_price: Decimal::new(39_60, 2),
            total_price: Decimal::new(39_60, 2),
        }],
        product_line: Some(ProductLine::Standard),
    }
}

pub(crate) fn monument(id: &str, markup: Decimal) -> Monument {
    Monument {
        id: MonumentId::new(id),
        slug: id.to_string(),
        title: id.replace('-', " "),
        markup_std: markup,
        narrative: String::new(),
        image: format!("/monuments/{id}.png"),
    }
}

/// Two monuments: `lennon-cut` at 2.2× and `cbgb-wall` at 2.4×.
pub(crate) fn catalog() -> Catalog {
    Catalog::new(vec![
        monument("lennon-cut", Decimal::new(22, 1)),
        monument("cbgb-wall", Decimal::new(24, 1)),
    ])
    .unwrap_or_default()
}
