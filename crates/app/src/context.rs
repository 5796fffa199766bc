//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{
    domain::checkout::{CheckoutService, GatewayCheckoutService},
    payments::{HelcimConfig, HelcimGateway, PaymentGateway},
};

#[derive(Clone)]
pub struct AppContext {
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context around a payment gateway.
    pub fn from_gateway(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            checkout: Arc::new(GatewayCheckoutService::new(gateway)),
        }
    }

    /// Build application context charging cards through Helcim.
    pub fn from_helcim_config(config: HelcimConfig) -> Self {
        Self::from_gateway(Arc::new(HelcimGateway::new(config)))
    }
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
