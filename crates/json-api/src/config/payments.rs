//! Payments Config

use std::fmt::{Debug, Formatter, Result as FmtResult};

use clap::Args;

use verse_app::payments::{DEFAULT_HELCIM_API_URL, HelcimConfig};

/// Helcim processor settings.
///
/// Both credentials may be absent; the server still starts and every checkout
/// is refused until they are provided.
#[derive(Args)]
pub struct PaymentsConfig {
    /// Helcim API token
    #[arg(long, env = "HELCIM_API_KEY", hide_env_values = true)]
    pub helcim_api_key: Option<String>,

    /// Helcim terminal id (numeric)
    #[arg(long, env = "HELCIM_TERMINAL_ID")]
    pub helcim_terminal_id: Option<String>,

    /// Helcim API base URL
    #[arg(long, env = "HELCIM_API_URL", default_value = DEFAULT_HELCIM_API_URL)]
    pub helcim_api_url: String,
}

impl PaymentsConfig {
    /// Processor configuration for the payment gateway.
    #[must_use]
    pub fn helcim(&self) -> HelcimConfig {
        HelcimConfig {
            api_token: self.helcim_api_key.clone(),
            terminal_id: self.helcim_terminal_id.clone(),
            base_url: self.helcim_api_url.clone(),
        }
    }
}

impl Debug for PaymentsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PaymentsConfig")
            .field(
                "helcim_api_key",
                &self.helcim_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("helcim_terminal_id", &self.helcim_terminal_id)
            .field("helcim_api_url", &self.helcim_api_url)
            .finish()
    }
}
