//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::Serialize;
use tracing::{error, info, warn};
use verse::ProductLine;

use crate::{
    domain::checkout::{
        data::{Billing, CheckoutRequest, OrderLine},
        errors::CheckoutServiceError,
    },
    payments::{PaymentFailure, PaymentGateway, PaymentRequest, PaymentResult},
};

/// Currency used when a submission does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Shopper-facing reason when the processor gives none, or is misconfigured.
pub const GENERIC_PAYMENT_FAILURE: &str = "Payment processing failed";

/// The order as accepted, echoed back to the storefront.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEcho {
    pub transaction_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub billing: Billing,
    pub items: Vec<OrderLine>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_line: Option<ProductLine>,

    pub timestamp: Timestamp,
}

/// A successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub transaction_id: Option<String>,
    pub order: OrderEcho,
}

#[derive(Clone)]
pub struct GatewayCheckoutService {
    gateway: Arc<dyn PaymentGateway>,
}

impl GatewayCheckoutService {
    #[must_use]
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

impl std::fmt::Debug for GatewayCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayCheckoutService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for GatewayCheckoutService {
    async fn checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutServiceError> {
        let CheckoutRequest {
            amount,
            currency,
            customer_code,
            invoice_number,
            comments,
            card_data,
            billing,
            items,
            product_line,
        } = request;

        let (Some(amount), Some(card_data), Some(billing)) =
            (amount.filter(|amount| *amount != 0), card_data, billing)
        else {
            return Err(CheckoutServiceError::MissingRequiredFields);
        };

        if amount < 0 {
            return Err(CheckoutServiceError::InvalidAmount);
        }

        let currency = currency
            .filter(|currency| !currency.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let result = self
            .gateway
            .process_payment(PaymentRequest {
                amount,
                currency: currency.clone(),
                customer_code,
                invoice_number: invoice_number.clone(),
                comments,
                card_data,
            })
            .await;

        if !result.success {
            return Err(CheckoutServiceError::PaymentFailed(failure_reason(result)));
        }

        info!(
            amount,
            %currency,
            invoice_number = invoice_number.as_deref().unwrap_or_default(),
            lines = items.len(),
            "checkout completed"
        );

        let transaction_id = result.transaction_id;

        Ok(CheckoutReceipt {
            transaction_id: transaction_id.clone(),
            order: OrderEcho {
                transaction_id,
                amount,
                currency,
                billing,
                items,
                product_line,
                timestamp: Timestamp::now(),
            },
        })
    }
}

fn failure_reason(result: PaymentResult) -> String {
    let error = result.error.filter(|error| !error.is_empty());

    if result.failure == Some(PaymentFailure::Configuration) {
        error!(
            error = error.as_deref().unwrap_or_default(),
            "payment processor is not configured"
        );

        return GENERIC_PAYMENT_FAILURE.to_string();
    }

    warn!(
        error = error.as_deref().unwrap_or_default(),
        "payment was not accepted"
    );

    error.unwrap_or_else(|| GENERIC_PAYMENT_FAILURE.to_string())
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Validate a submission and charge the shopper's card.
    async fn checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{payments::MockPaymentGateway, test::helpers};

    fn service(gateway: MockPaymentGateway) -> GatewayCheckoutService {
        GatewayCheckoutService::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn missing_amount_is_rejected_before_payment() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().never();

        let result = service(gateway)
            .checkout(CheckoutRequest {
                amount: None,
                ..helpers::checkout_request()
            })
            .await;

        assert_eq!(result, Err(CheckoutServiceError::MissingRequiredFields));
    }

    #[tokio::test]
    async fn zero_amount_counts_as_missing() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().never();

        let result = service(gateway)
            .checkout(CheckoutRequest {
                amount: Some(0),
                ..helpers::checkout_request()
            })
            .await;

        assert_eq!(result, Err(CheckoutServiceError::MissingRequiredFields));
    }

    #[tokio::test]
    async fn missing_card_or_billing_is_rejected() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().never();
        let service = service(gateway);

        let no_card = service
            .checkout(CheckoutRequest {
                card_data: None,
                ..helpers::checkout_request()
            })
            .await;

        let no_billing = service
            .checkout(CheckoutRequest {
                billing: None,
                ..helpers::checkout_request()
            })
            .await;

        assert_eq!(no_card, Err(CheckoutServiceError::MissingRequiredFields));
        assert_eq!(no_billing, Err(CheckoutServiceError::MissingRequiredFields));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().never();

        let result = service(gateway)
            .checkout(CheckoutRequest {
                amount: Some(-100),
                ..helpers::checkout_request()
            })
            .await;

        assert_eq!(result, Err(CheckoutServiceError::InvalidAmount));
    }

    #[tokio::test]
    async fn approved_payment_returns_receipt() -> TestResult {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_process_payment()
            .withf(|request| {
                request.amount == 50_00
                    && request.currency == "USD"
                    && request.invoice_number.as_deref() == Some("ORDER-1")
                    && request.card_data.card_number == "4111111111111111"
            })
            .once()
            .return_once(|_| {
                PaymentResult::approved(Some("TX123".to_string()), "Payment successful", None)
            });

        let receipt = service(gateway)
            .checkout(CheckoutRequest {
                amount: Some(50_00),
                ..helpers::checkout_request()
            })
            .await?;

        assert_eq!(receipt.transaction_id.as_deref(), Some("TX123"));
        assert_eq!(receipt.order.transaction_id.as_deref(), Some("TX123"));
        assert_eq!(receipt.order.amount, 50_00);
        assert_eq!(receipt.order.billing.full_name, "Patti Smith");
        assert_eq!(receipt.order.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn currency_defaults_to_usd() -> TestResult {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_process_payment()
            .withf(|request| request.currency == DEFAULT_CURRENCY)
            .once()
            .return_once(|_| PaymentResult::approved(None, "Payment successful", None));

        let receipt = service(gateway)
            .checkout(CheckoutRequest {
                currency: None,
                ..helpers::checkout_request()
            })
            .await?;

        assert_eq!(receipt.order.currency, "USD");
        assert_eq!(receipt.transaction_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn declined_payment_carries_processor_message() {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_process_payment()
            .once()
            .return_once(|_| {
                PaymentResult::failed(PaymentFailure::Rejected, "Card declined", None)
            });

        let result = service(gateway)
            .checkout(helpers::checkout_request())
            .await;

        assert_eq!(
            result,
            Err(CheckoutServiceError::PaymentFailed("Card declined".to_string()))
        );
    }

    #[tokio::test]
    async fn misconfigured_processor_is_reported_generically() {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_process_payment()
            .once()
            .return_once(|_| {
                PaymentResult::failed(
                    PaymentFailure::Configuration,
                    "Helcim API credentials not configured",
                    None,
                )
            });

        let result = service(gateway)
            .checkout(helpers::checkout_request())
            .await;

        assert_eq!(
            result,
            Err(CheckoutServiceError::PaymentFailed(
                "Payment processing failed".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn transport_failure_message_passes_through() {
        let mut gateway = MockPaymentGateway::new();

        gateway.expect_process_payment().once().return_once(|_| {
            PaymentResult::failed(PaymentFailure::Transport, "connection refused", None)
        });

        let result = service(gateway)
            .checkout(helpers::checkout_request())
            .await;

        assert_eq!(
            result,
            Err(CheckoutServiceError::PaymentFailed(
                "connection refused".to_string()
            ))
        );
    }
}
