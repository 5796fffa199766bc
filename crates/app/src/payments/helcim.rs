//! Helcim payment processor client.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    num::ParseIntError,
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::payments::{
    PaymentGateway,
    models::{CardData, PaymentFailure, PaymentRequest, PaymentResult},
};

/// Production Helcim API base URL.
pub const DEFAULT_HELCIM_API_URL: &str = "https://api.helcim.com";

const PAYMENT_PATH: &str = "/v2/payment";

const API_TOKEN_HEADER: &str = "api-token";

const APPROVED_MESSAGE: &str = "Payment successful";

const DECLINED_FALLBACK: &str = "Payment processing failed";

/// Credentials and endpoint for the Helcim API.
#[derive(Clone)]
pub struct HelcimConfig {
    /// API token sent in the `api-token` header
    pub api_token: Option<String>,

    /// Numeric terminal identifier
    pub terminal_id: Option<String>,

    /// API base URL, without a trailing slash
    pub base_url: String,
}

impl HelcimConfig {
    /// Whether both credentials are present and non-empty.
    pub fn is_configured(&self) -> bool {
        present(self.api_token.as_deref()).is_some() && present(self.terminal_id.as_deref()).is_some()
    }
}

impl Default for HelcimConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            terminal_id: None,
            base_url: DEFAULT_HELCIM_API_URL.to_string(),
        }
    }
}

impl Debug for HelcimConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HelcimConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("terminal_id", &self.terminal_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Failures while talking to Helcim.
#[derive(Debug, Error)]
pub enum HelcimError {
    #[error("Helcim API credentials not configured")]
    NotConfigured,

    #[error("Helcim terminal id must be numeric")]
    InvalidTerminalId(#[source] ParseIntError),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[source] serde_json::Error),

    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
        body: Option<Value>,
    },
}

impl From<HelcimError> for PaymentResult {
    fn from(error: HelcimError) -> Self {
        let message = error.to_string();

        match error {
            HelcimError::NotConfigured | HelcimError::InvalidTerminalId(_) => {
                PaymentResult::failed(PaymentFailure::Configuration, message, None)
            }
            HelcimError::Rejected { body, .. } => {
                PaymentResult::failed(PaymentFailure::Rejected, message, body)
            }
            HelcimError::Http(_) | HelcimError::Decode(_) => {
                PaymentResult::failed(PaymentFailure::Transport, message, None)
            }
        }
    }
}

struct Credentials<'a> {
    api_token: &'a str,
    terminal_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentBody<'a> {
    terminal_id: u64,

    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,

    currency: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    customer_code: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_number: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<&'a str>,

    #[serde(flatten)]
    card: &'a CardData,
}

struct Approval {
    transaction_id: Option<String>,
    body: Value,
}

/// Payment gateway backed by the Helcim card-present/not-present API.
#[derive(Debug, Clone)]
pub struct HelcimGateway {
    config: HelcimConfig,
    http: Client,
}

impl HelcimGateway {
    #[must_use]
    pub fn new(config: HelcimConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn credentials(&self) -> Result<Credentials<'_>, HelcimError> {
        let (Some(api_token), Some(terminal_id)) = (
            present(self.config.api_token.as_deref()),
            present(self.config.terminal_id.as_deref()),
        ) else {
            return Err(HelcimError::NotConfigured);
        };

        let terminal_id = terminal_id
            .trim()
            .parse()
            .map_err(HelcimError::InvalidTerminalId)?;

        Ok(Credentials {
            api_token,
            terminal_id,
        })
    }

    async fn charge(&self, request: &PaymentRequest) -> Result<Approval, HelcimError> {
        let credentials = self.credentials()?;

        let url = format!(
            "{}{PAYMENT_PATH}",
            self.config.base_url.trim_end_matches('/')
        );

        let body = PaymentBody {
            terminal_id: credentials.terminal_id,
            amount: Decimal::new(request.amount, 2),
            currency: &request.currency,
            customer_code: request.customer_code.as_deref(),
            invoice_number: request.invoice_number.as_deref(),
            comments: request.comments.as_deref(),
            card: &request.card_data,
        };

        let response = self
            .http
            .post(&url)
            .header(API_TOKEN_HEADER, credentials.api_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).ok();

            let message = body
                .as_ref()
                .and_then(|data| data.get("message"))
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or(DECLINED_FALLBACK)
                .to_string();

            return Err(HelcimError::Rejected {
                status,
                message,
                body,
            });
        }

        let body: Value = serde_json::from_str(&text).map_err(HelcimError::Decode)?;

        let transaction_id = match body.get("transactionId") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };

        Ok(Approval {
            transaction_id,
            body,
        })
    }
}

#[async_trait]
impl PaymentGateway for HelcimGateway {
    async fn process_payment(&self, request: PaymentRequest) -> PaymentResult {
        match self.charge(&request).await {
            Ok(approval) => {
                info!(
                    amount = request.amount,
                    currency = %request.currency,
                    transaction_id = approval.transaction_id.as_deref().unwrap_or_default(),
                    "payment approved"
                );

                PaymentResult::approved(approval.transaction_id, APPROVED_MESSAGE, Some(approval.body))
            }
            Err(error) => {
                if let HelcimError::Rejected { status, .. } = &error {
                    warn!(%status, error = %error, "payment declined by processor");
                } else {
                    warn!(error = %error, "payment could not be processed");
                }

                error.into()
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
