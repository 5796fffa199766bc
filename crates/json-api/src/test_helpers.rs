//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use serde_json::{Value, json};

use verse_app::{
    context::AppContext, domain::checkout::MockCheckoutService, payments::MockPaymentGateway,
};

use crate::{checkout, state::State};

pub(crate) fn state_with_checkout(checkout: MockCheckoutService) -> Arc<State> {
    State::from_app_context(AppContext {
        checkout: Arc::new(checkout),
    })
}

pub(crate) fn state_with_gateway(gateway: MockPaymentGateway) -> Arc<State> {
    State::from_app_context(AppContext::from_gateway(Arc::new(gateway)))
}

pub(crate) fn checkout_service(state: Arc<State>) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .push(Router::with_path("api/checkout").post(checkout::process::handler)),
    )
}

/// A complete storefront submission for a single standard-line piece.
pub(crate) fn checkout_payload() -> Value {
    json!({
        "amount": 5000,
        "currency": "USD",
        "invoiceNumber": "ORDER-1700000000000",
        "comments": "1 item(s) - standard line",
        "cardData": {
            "cardNumber": "4111111111111111",
            "cardExpiry": "1229",
            "cardCVV": "123",
            "cardHolderName": "Patti Smith",
            "cardHolderPostalCode": "10003"
        },
        "billing": {
            "fullName": "Patti Smith",
            "email": "patti@example.com",
            "address": "315 Bowery",
            "city": "New York",
            "state": "NY",
            "zip": "10003",
            "country": "US"
        },
        "items": [{
            "id": "lennon-cut",
            "title": "Lennon Cut",
            "slug": "lennon-cut",
            "image": "/monuments/lennon-cut.png",
            "quantity": 1,
            "unitPrice": 39.6,
            "totalPrice": 39.6
        }],
        "productLine": "standard"
    })
}
