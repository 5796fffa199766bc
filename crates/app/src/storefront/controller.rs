//! Checkout submission controller.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use jiff::Timestamp;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};
use verse::{Catalog, OrderSummary, PricingError, PricingTables, ProductLine};

use crate::{
    domain::checkout::{
        DEFAULT_CURRENCY,
        data::{CheckoutRequest, OrderLine},
    },
    storefront::{
        cart::CartStore,
        client::{CheckoutApi, CheckoutApiError},
        form::{CheckoutForm, Field},
    },
};

/// Shown when the endpoint declines without saying why.
pub const PAYMENT_FAILED_FALLBACK: &str =
    "Payment failed. Please check your card details and try again.";

/// Shown when the endpoint cannot be reached.
pub const TRANSPORT_FAILURE: &str = "An error occurred. Please try again.";

const CONFIRMATION_PATH: &str = "/checkout/success";

/// Where a checkout submission stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        transaction_id: Option<String>,
    },
    Failed {
        error: String,
    },
}

impl SubmissionState {
    /// Error message to show alongside the form, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Where the storefront should go after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Confirmation { transaction_id: Option<String> },
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Confirmation {
                transaction_id: Some(id),
            } => format!("{CONFIRMATION_PATH}?orderId={id}"),
            Navigation::Confirmation { transaction_id: None } => CONFIRMATION_PATH.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a checkout submission is already in flight")]
    InFlight,

    #[error("cart is empty")]
    EmptyCart,

    #[error("failed to price cart: {0}")]
    Pricing(#[from] PricingError),

    /// The endpoint declined; carries the message shown to the shopper.
    #[error("{0}")]
    Declined(String),

    #[error("An error occurred. Please try again.")]
    Transport(#[source] CheckoutApiError),
}

/// Drives the checkout page: form edits, order summary and submission.
///
/// Shared between views behind an `Arc`; at most one submission is in flight
/// at a time.
pub struct CheckoutController {
    cart: CartStore,
    catalog: Arc<Catalog>,
    tables: PricingTables,
    api: Arc<dyn CheckoutApi>,
    form: watch::Sender<CheckoutForm>,
    state: watch::Sender<SubmissionState>,
}

impl CheckoutController {
    pub fn new(
        cart: CartStore,
        catalog: Arc<Catalog>,
        tables: PricingTables,
        api: Arc<dyn CheckoutApi>,
    ) -> Self {
        Self {
            cart,
            catalog,
            tables,
            api,
            form: watch::Sender::new(CheckoutForm::new()),
            state: watch::Sender::new(SubmissionState::Idle),
        }
    }

    pub fn set_field(&self, field: Field, value: &str) {
        self.form.send_modify(|form| form.set(field, value));
    }

    pub fn select_line(&self, line: ProductLine) {
        self.form.send_if_modified(|form| {
            if form.product_line() == line {
                return false;
            }

            form.select_line(line);
            true
        });
    }

    pub fn form(&self) -> CheckoutForm {
        self.form.borrow().clone()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<CheckoutForm> {
        self.form.subscribe()
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        *self.state.borrow() != SubmissionState::Submitting && !self.cart.is_empty()
    }

    /// Price the cart for the selected product line.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if an amount cannot be represented.
    pub fn summary(&self) -> Result<OrderSummary, PricingError> {
        let line = self.form.borrow().product_line();
        let cart = self.cart.snapshot();

        OrderSummary::compute(cart.items(), &self.catalog, self.tables.wholesale(line))
    }

    /// Assemble the checkout submission for the current cart and form.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptyCart`]: nothing in the cart resolves to a catalog item.
    /// - [`SubmitError::Pricing`]: the cart could not be priced.
    pub fn build_request(&self, now: Timestamp) -> Result<CheckoutRequest, SubmitError> {
        let form = self.form();
        let cart = self.cart.snapshot();
        let line = form.product_line();

        let summary =
            OrderSummary::compute(cart.items(), &self.catalog, self.tables.wholesale(line))?;

        if summary.line_items.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        Ok(CheckoutRequest {
            amount: Some(summary.totals.amount_cents()),
            currency: Some(DEFAULT_CURRENCY.to_string()),
            customer_code: Some(form.get(Field::Email).trim().to_string())
                .filter(|email| !email.is_empty()),
            invoice_number: Some(format!("ORDER-{}", now.as_millisecond())),
            comments: Some(format!("{} item(s) - {line} line", cart.len())),
            card_data: Some(form.card_data()),
            billing: Some(form.billing()),
            items: summary.line_items.iter().map(OrderLine::from).collect(),
            product_line: Some(line),
        })
    }

    /// Submit the checkout.
    ///
    /// On success the cart is cleared and the confirmation route returned.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::InFlight`]: another submission has not finished.
    /// - [`SubmitError::EmptyCart`] or [`SubmitError::Pricing`]: nothing to submit.
    /// - [`SubmitError::Declined`]: the endpoint refused the payment.
    /// - [`SubmitError::Transport`]: the endpoint could not be reached.
    pub async fn submit(&self) -> Result<Navigation, SubmitError> {
        if *self.state.borrow() == SubmissionState::Submitting {
            return Err(SubmitError::InFlight);
        }

        // Refusals before the claim leave any earlier outcome on display.
        let request = self.build_request(Timestamp::now())?;

        let flight = InFlight::claim(&self.state).ok_or(SubmitError::InFlight)?;

        match self.api.submit(request).await {
            Ok(response) if response.success => {
                self.cart.clear();

                info!(
                    transaction_id = response.transaction_id.as_deref().unwrap_or_default(),
                    "checkout confirmed"
                );

                let transaction_id = response.transaction_id;

                flight.settle(SubmissionState::Succeeded {
                    transaction_id: transaction_id.clone(),
                });

                Ok(Navigation::Confirmation { transaction_id })
            }
            Ok(response) => {
                let error = response
                    .error
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| PAYMENT_FAILED_FALLBACK.to_string());

                flight.settle(SubmissionState::Failed {
                    error: error.clone(),
                });

                Err(SubmitError::Declined(error))
            }
            Err(error) => {
                warn!(%error, "checkout submission failed");

                flight.settle(SubmissionState::Failed {
                    error: TRANSPORT_FAILURE.to_string(),
                });

                Err(SubmitError::Transport(error))
            }
        }
    }
}

impl Debug for CheckoutController {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CheckoutController")
            .field("cart", &self.cart)
            .field("tables", &self.tables)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Marks a submission in flight; falls back to idle if dropped unsettled.
struct InFlight<'a> {
    state: &'a watch::Sender<SubmissionState>,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn claim(state: &'a watch::Sender<SubmissionState>) -> Option<Self> {
        let claimed = state.send_if_modified(|current| {
            if *current == SubmissionState::Submitting {
                return false;
            }

            *current = SubmissionState::Submitting;
            true
        });

        claimed.then_some(Self {
            state,
            settled: false,
        })
    }

    fn settle(mut self, outcome: SubmissionState) {
        self.settled = true;
        self.state.send_replace(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_replace(SubmissionState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tokio::sync::{Mutex, oneshot};
    use verse::CartItem;

    use super::*;
    use crate::{
        storefront::client::{HttpCheckoutApi, MockCheckoutApi, SubmissionResponse},
        test::helpers,
    };

    fn item(id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: id.into(),
            quantity,
            title: id.to_string(),
            image: format!("/monuments/{id}.png"),
            slug: id.to_string(),
        }
    }

    fn controller(cart: &CartStore, api: Arc<dyn CheckoutApi>) -> CheckoutController {
        let controller = CheckoutController::new(
            cart.clone(),
            Arc::new(helpers::catalog()),
            PricingTables::default(),
            api,
        );

        controller.set_field(Field::FullName, "Patti Smith");
        controller.set_field(Field::Email, "patti@example.com");
        controller.set_field(Field::Zip, "10003");
        controller.set_field(Field::CardNumber, "4111111111111111");
        controller.set_field(Field::CardExpiry, "1229");
        controller.set_field(Field::CardCvv, "123");

        controller
    }

    fn filled_cart() -> CartStore {
        let cart = CartStore::new();
        cart.add(item("lennon-cut", 2));
        cart.add(item("cbgb-wall", 1));
        cart
    }

    fn responding(response: SubmissionResponse) -> Arc<dyn CheckoutApi> {
        let mut api = MockCheckoutApi::new();
        api.expect_submit()
            .once()
            .return_once(move |_| Ok(response));
        Arc::new(api)
    }

    #[test]
    fn request_carries_totals_and_metadata() -> TestResult {
        let cart = filled_cart();
        let controller = controller(&cart, Arc::new(MockCheckoutApi::new()));

        let request = controller.build_request(Timestamp::from_millisecond(1_700_000_000_000)?)?;

        // 2 × 39.60 + 43.20 = 122.40; tax 10.71
        assert_eq!(request.amount, Some(133_11));
        assert_eq!(request.currency.as_deref(), Some("USD"));
        assert_eq!(request.customer_code.as_deref(), Some("patti@example.com"));
        assert_eq!(request.invoice_number.as_deref(), Some("ORDER-1700000000000"));
        assert_eq!(request.comments.as_deref(), Some("2 item(s) - standard line"));
        assert_eq!(request.product_line, Some(ProductLine::Standard));
        assert_eq!(
            request.items.first().map(|line| line.total_price),
            Some(Decimal::new(79_20, 2))
        );

        let card = request.card_data.ok_or("missing card data")?;
        assert_eq!(card.card_number, "4111111111111111");
        assert_eq!(card.card_expiry, "1229");
        assert_eq!(card.card_holder_name, "Patti Smith");

        Ok(())
    }

    #[test]
    fn selecting_usa_line_reprices() -> TestResult {
        let cart = CartStore::new();
        cart.add(item("lennon-cut", 1));
        let controller = controller(&cart, Arc::new(MockCheckoutApi::new()));

        controller.select_line(ProductLine::Usa);

        let summary = controller.summary()?;
        let request = controller.build_request(Timestamp::now())?;

        // 28 × 2.2 = 61.60; tax 5.39
        assert_eq!(summary.totals.amount_cents(), 66_99);
        assert_eq!(request.amount, Some(66_99));
        assert_eq!(request.comments.as_deref(), Some("1 item(s) - usa line"));

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_not_submitted() {
        let mut api = MockCheckoutApi::new();
        api.expect_submit().never();

        let controller = controller(&CartStore::new(), Arc::new(api));

        assert!(!controller.can_submit());
        assert!(matches!(controller.submit().await, Err(SubmitError::EmptyCart)));
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn empty_cart_keeps_previous_failure_visible() {
        let cart = filled_cart();
        let controller = controller(
            &cart,
            responding(SubmissionResponse {
                success: false,
                error: Some("Card declined".to_string()),
                ..SubmissionResponse::default()
            }),
        );

        controller.submit().await.ok();
        cart.clear();

        assert!(matches!(controller.submit().await, Err(SubmitError::EmptyCart)));
        assert_eq!(controller.state().error(), Some("Card declined"));
    }

    #[tokio::test]
    async fn success_clears_cart_and_navigates() -> TestResult {
        let cart = filled_cart();
        let controller = controller(
            &cart,
            responding(SubmissionResponse {
                success: true,
                transaction_id: Some("TX123".to_string()),
                message: Some("Payment processed successfully".to_string()),
                error: None,
            }),
        );

        let navigation = controller.submit().await?;

        assert_eq!(navigation.path(), "/checkout/success?orderId=TX123");
        assert!(cart.is_empty());
        assert_eq!(
            controller.state(),
            SubmissionState::Succeeded {
                transaction_id: Some("TX123".to_string())
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn decline_keeps_cart_and_shows_error() {
        let cart = filled_cart();
        let controller = controller(
            &cart,
            responding(SubmissionResponse {
                success: false,
                error: Some("Card declined".to_string()),
                ..SubmissionResponse::default()
            }),
        );

        let result = controller.submit().await;

        assert!(matches!(result, Err(SubmitError::Declined(ref error)) if error == "Card declined"));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(controller.state().error(), Some("Card declined"));
        assert!(controller.can_submit());
    }

    #[tokio::test]
    async fn decline_without_reason_uses_fallback() {
        let controller = controller(&filled_cart(), responding(SubmissionResponse::default()));

        controller.submit().await.ok();

        assert_eq!(
            controller.state().error(),
            Some("Payment failed. Please check your card details and try again.")
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_generic_error() {
        let cart = filled_cart();
        let controller = controller(&cart, Arc::new(HttpCheckoutApi::new("http://127.0.0.1:9")));

        let result = controller.submit().await;

        assert!(matches!(result, Err(SubmitError::Transport(_))));
        assert_eq!(
            controller.state().error(),
            Some("An error occurred. Please try again.")
        );
        assert_eq!(cart.item_count(), 3);
    }

    struct GatedApi {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl CheckoutApi for GatedApi {
        async fn submit(
            &self,
            _request: CheckoutRequest,
        ) -> Result<SubmissionResponse, CheckoutApiError> {
            let gate = self.gate.lock().await.take();

            if let Some(gate) = gate {
                gate.await.ok();
            }

            Ok(SubmissionResponse {
                success: true,
                transaction_id: Some("TX1".to_string()),
                ..SubmissionResponse::default()
            })
        }
    }

    #[tokio::test]
    async fn second_submission_is_refused_while_in_flight() -> TestResult {
        let (release, gate) = oneshot::channel();

        let controller = Arc::new(controller(
            &filled_cart(),
            Arc::new(GatedApi {
                gate: Mutex::new(Some(gate)),
            }),
        ));

        let mut state = controller.subscribe();

        let first = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.submit().await }
        });

        state
            .wait_for(|state| *state == SubmissionState::Submitting)
            .await?;

        assert!(!controller.can_submit());
        assert!(matches!(controller.submit().await, Err(SubmitError::InFlight)));

        release.send(()).ok();

        let navigation = first.await??;

        assert_eq!(
            navigation,
            Navigation::Confirmation {
                transaction_id: Some("TX1".to_string())
            }
        );

        Ok(())
    }

    #[test]
    fn confirmation_without_transaction_id() {
        let navigation = Navigation::Confirmation {
            transaction_id: None,
        };

        assert_eq!(navigation.path(), "/checkout/success");
    }
}
