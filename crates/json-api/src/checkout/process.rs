//! Checkout Processing

use salvo::prelude::*;
use serde::Serialize;
use tracing::warn;

use verse_app::domain::checkout::{CheckoutReceipt, OrderEcho, data::CheckoutRequest};

use crate::{checkout::errors::CheckoutFailure, extensions::*};

pub(crate) const SUCCESS_MESSAGE: &str = "Payment processed successfully";

/// Checkout Processed Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub message: &'static str,
    pub order: OrderEcho,
}

impl From<CheckoutReceipt> for CheckoutResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            success: true,
            transaction_id: receipt.transaction_id,
            message: SUCCESS_MESSAGE,
            order: receipt.order,
        }
    }
}

/// Process Checkout Handler
///
/// Charges the shopper's card for the submitted order total.
#[endpoint(
    tags("checkout"),
    summary = "Process Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Payment processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields, invalid payload or payment declined"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match process(req, depot).await {
        Ok(receipt) => {
            res.status_code(StatusCode::OK);
            res.render(Json(CheckoutResponse::from(receipt)));
        }
        Err(failure) => failure.render(res),
    }
}

async fn process(req: &mut Request, depot: &Depot) -> Result<CheckoutReceipt, CheckoutFailure> {
    let state = depot.app_state().ok_or(CheckoutFailure::Unexpected)?;

    let request = req
        .parse_json::<CheckoutRequest>()
        .await
        .map_err(|error| {
            warn!(%error, "rejected undecodable checkout payload");

            CheckoutFailure::InvalidPayload
        })?;

    Ok(state.checkout().checkout(request).await?)
}
