use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn, Instrument};

use crate::error::REQUEST_ID_HEADER;

/// Logs every inbound request with its correlation id and latency.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Set by SetRequestIdLayer unless the caller sent one
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        method = %method,
        path = %path,
        request_id = %request_id,
    );

    async move {
        let response = next.run(request).await;
        let status = response.status().as_u16();
        let duration_ms = start.elapsed().as_millis() as u64;

        match status {
            200..=299 => info!(status, duration_ms, "Request completed"),
            401 => warn!(status, duration_ms, "Callback signature rejected"),
            400..=499 => warn!(status, duration_ms, "Client error"),
            _ => warn!(status, duration_ms, "Server error"),
        }

        response
    }
    .instrument(span)
    .await
}

/// JSON logs for deployed receivers.
pub fn init_tracing() {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tembo_gateway=debug"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Pretty printed logs, selected with `TEMBO_LOG_FORMAT=pretty`.
pub fn init_tracing_dev() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug,tembo_gateway=trace"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).pretty())
        .init();
}
