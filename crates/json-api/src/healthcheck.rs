//! Verse JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Server build version
    pub version: String,
}

impl HealthResponse {
    fn current() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Healthcheck handler
///
/// Reports liveness and the running build. Does not contact the payment processor.
#[endpoint(tags("health"), summary = "Liveness and build version")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}
