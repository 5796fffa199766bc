//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::Depot;
use tracing::error;

use crate::state::State;

/// Typed access to shared server state injected into the depot.
pub(crate) trait DepotExt {
    fn app_state(&self) -> Option<&Arc<State>>;
}

impl DepotExt for Depot {
    fn app_state(&self) -> Option<&Arc<State>> {
        let state = self.obtain::<Arc<State>>().ok();

        if state.is_none() {
            error!("server state missing from depot");
        }

        state
    }
}
