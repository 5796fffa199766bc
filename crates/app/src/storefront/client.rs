//! Checkout endpoint client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::checkout::data::CheckoutRequest;

const CHECKOUT_PATH: &str = "/api/checkout";

/// The checkout endpoint's response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,

    #[serde(default)]
    pub transaction_id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum CheckoutApiError {
    #[error("checkout request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Transport to the checkout endpoint.
#[automock]
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// Submit a checkout and decode the response envelope, whatever its status.
    async fn submit(
        &self,
        request: CheckoutRequest,
    ) -> Result<SubmissionResponse, CheckoutApiError>;
}

/// [`CheckoutApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCheckoutApi {
    endpoint: String,
    http: Client,
}

impl HttpCheckoutApi {
    /// Client for the storefront served at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}{CHECKOUT_PATH}", base_url.trim_end_matches('/')),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CheckoutApi for HttpCheckoutApi {
    async fn submit(
        &self,
        request: CheckoutRequest,
    ) -> Result<SubmissionResponse, CheckoutApiError> {
        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        Ok(response.json().await?)
    }
}
