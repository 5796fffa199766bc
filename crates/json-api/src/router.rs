//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{checkout, healthcheck, observability::RequestLogging, state::State};

const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Application routes, without middleware or docs.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("api/checkout").post(checkout::process::handler))
}

/// The full server router: middleware, routes, OpenAPI document and Swagger UI.
pub(crate) fn build(state: Arc<State>, slow_request_threshold: Duration) -> Router {
    let router = Router::new()
        .hoop(checkout::errors::envelope_server_errors)
        .hoop(CatchPanic::new())
        .hoop(RequestLogging::new(slow_request_threshold))
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(app_router());

    let doc = OpenApi::new("Verse Checkout API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("docs"))
}
