//! Request-level logging and request IDs.

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Level, error, info, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Correlation id for one request: the caller's `x-request-id`, or a fresh v7 UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestId(String);

impl RequestId {
    fn from_header(value: Option<String>) -> Self {
        value
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map_or_else(|| Self(Uuid::now_v7().to_string()), Self)
    }

    fn as_str(&self) -> &str {
        &self.0
    }

    fn stamp(&self, res: &mut Response) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => {
                warn!(request_id = %self.0, "request id is not a valid header value: {source}");
            }
        }
    }
}

fn outcome_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Logs each request inside an `http.request` span and tags it with a request id.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_threshold: Duration,
}

impl RequestLogging {
    pub(crate) fn new(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let started = Instant::now();
        let request_id = RequestId::from_header(req.header::<String>(REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.as_str().to_owned());
        request_id.stamp(res);

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id.as_str(),
            method = %req.method(),
            path = %req.uri().path(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let elapsed = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = elapsed.as_millis();

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        let _entered = span.enter();

        let level = outcome_level(status);

        if level == Level::ERROR {
            error!(status = status.as_u16(), duration_ms, "request failed");
        } else if level == Level::WARN {
            warn!(status = status.as_u16(), duration_ms, "request rejected");
        } else {
            info!(status = status.as_u16(), duration_ms, "request completed");
        }

        if elapsed > self.slow_threshold {
            warn!(
                duration_ms,
                threshold_ms = self.slow_threshold.as_millis(),
                "slow request"
            );
        }
    }
}
