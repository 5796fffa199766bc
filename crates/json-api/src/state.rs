//! State

use std::sync::Arc;

use verse_app::{context::AppContext, domain::checkout::CheckoutService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self { app }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }

    pub(crate) fn checkout(&self) -> &dyn CheckoutService {
        self.app.checkout.as_ref()
    }
}
