//! Errors

use salvo::{http::StatusCode, prelude::*};
use serde::{Deserialize, Serialize};

use verse_app::domain::checkout::CheckoutServiceError;

pub(crate) const MISSING_FIELDS: &str = "Missing required fields";
pub(crate) const INVALID_AMOUNT: &str = "Invalid checkout amount";
pub(crate) const INVALID_PAYLOAD: &str = "Invalid checkout payload";
pub(crate) const UNEXPECTED: &str = "An unexpected error occurred";

/// Error envelope returned by the checkout endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// A checkout that could not be completed, ready to render.
#[derive(Debug)]
pub(crate) enum CheckoutFailure {
    InvalidPayload,
    Unexpected,
    Service(CheckoutServiceError),
}

impl From<CheckoutServiceError> for CheckoutFailure {
    fn from(error: CheckoutServiceError) -> Self {
        Self::Service(error)
    }
}

impl CheckoutFailure {
    fn status(&self) -> StatusCode {
        match self {
            CheckoutFailure::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutFailure::InvalidPayload | CheckoutFailure::Service(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn into_message(self) -> String {
        match self {
            CheckoutFailure::InvalidPayload => INVALID_PAYLOAD.to_string(),
            CheckoutFailure::Unexpected => UNEXPECTED.to_string(),
            CheckoutFailure::Service(CheckoutServiceError::MissingRequiredFields) => {
                MISSING_FIELDS.to_string()
            }
            CheckoutFailure::Service(CheckoutServiceError::InvalidAmount) => {
                INVALID_AMOUNT.to_string()
            }
            CheckoutFailure::Service(CheckoutServiceError::PaymentFailed(message)) => message,
        }
    }

    pub(crate) fn render(self, res: &mut Response) {
        res.status_code(self.status());
        res.render(Json(ErrorResponse {
            success: false,
            error: self.into_message(),
        }));
    }
}

/// Rewrites server errors that reach the catcher, panics included, as the
/// checkout error envelope.
///
/// Must wrap `CatchPanic` to see the panic response it renders.
#[handler]
pub(crate) async fn envelope_server_errors(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    if res.status_code == Some(StatusCode::INTERNAL_SERVER_ERROR) && res.body.is_error() {
        CheckoutFailure::Unexpected.render(res);
    }
}
