use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::handlers;
use crate::api::middleware::request_logging;
use crate::models::CallbackKind;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(handlers::health_check));

    // Provider callbacks; only the merchant route is signed
    let callback_routes = Router::new()
        .route(
            CallbackKind::Merchant.path(),
            post(handlers::merchant_callback),
        )
        .route(
            CallbackKind::WalletToMobile.path(),
            post(handlers::wallet_to_mobile_callback),
        )
        .route(
            CallbackKind::UtilityPayment.path(),
            post(handlers::utility_payment_callback),
        )
        .route(
            CallbackKind::Remittance.path(),
            post(handlers::remittance_callback),
        );

    Router::new()
        .merge(public_routes)
        .merge(callback_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging))
        // Outermost, so every inner layer and handler sees the id
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
