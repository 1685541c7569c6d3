use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;

use crate::error::{TemboError, TemboResult, ValidationErrors, WebhookResponse, REQUEST_ID_HEADER};
use crate::models::{CallbackEvent, CallbackKind, MerchantStatementEntry};
use crate::services::CallbackSignatureVerifier;
use crate::AppState;

const TIMESTAMP_HEADERS: [&str; 2] = ["x-tembo-timestamp", "x-request-timestamp"];
const SIGNATURE_HEADERS: [&str; 2] = ["x-tembo-signature", "x-request-signature"];

pub async fn merchant_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> TemboResult<Json<WebhookResponse>> {
    receive_callback(&state, CallbackKind::Merchant, &headers, &body)
}

pub async fn wallet_to_mobile_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> TemboResult<Json<WebhookResponse>> {
    receive_callback(&state, CallbackKind::WalletToMobile, &headers, &body)
}

pub async fn utility_payment_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> TemboResult<Json<WebhookResponse>> {
    receive_callback(&state, CallbackKind::UtilityPayment, &headers, &body)
}

pub async fn remittance_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> TemboResult<Json<WebhookResponse>> {
    receive_callback(&state, CallbackKind::Remittance, &headers, &body)
}

/// Validates one inbound callback, checks its signature when the kind is
/// signed, then publishes it. Nothing is published on failure.
fn receive_callback(
    state: &AppState,
    kind: CallbackKind,
    headers: &HeaderMap,
    body: &[u8],
) -> TemboResult<Json<WebhookResponse>> {
    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(?kind, "Callback body is not JSON: {}", e);
        TemboError::PayloadInvalid(ValidationErrors::new(vec![
            "The request body must be valid JSON.".to_string(),
        ]))
    })?;

    kind.schema().validate(&payload).map_err(|errors| {
        tracing::warn!(?kind, errors = errors.messages().len(), "Callback rejected");
        TemboError::PayloadInvalid(errors)
    })?;

    if kind.requires_signature() {
        verify_merchant_signature(state, headers, &payload)?;
    }

    let request_id = header(headers, &[REQUEST_ID_HEADER]).map(str::to_string);
    let delivered = state
        .broadcaster
        .publish(CallbackEvent::new(kind, payload, request_id));

    tracing::info!(?kind, delivered, "Callback accepted");

    Ok(Json(WebhookResponse::accepted()))
}

fn verify_merchant_signature(
    state: &AppState,
    headers: &HeaderMap,
    payload: &Value,
) -> TemboResult<()> {
    let (Some(timestamp), Some(signature)) = (
        header(headers, &TIMESTAMP_HEADERS),
        header(headers, &SIGNATURE_HEADERS),
    ) else {
        tracing::warn!("Merchant callback without signature headers");
        return Err(TemboError::SignatureInvalid);
    };

    let entry: MerchantStatementEntry = serde_json::from_value(payload.clone()).map_err(|e| {
        TemboError::PayloadInvalid(ValidationErrors::new(vec![e.to_string()]))
    })?;

    if CallbackSignatureVerifier::verify(
        state.config.tembo.callback_secret(),
        timestamp,
        &entry,
        signature,
    ) {
        Ok(())
    } else {
        tracing::warn!(transaction_id = %entry.transaction_id, "Invalid merchant callback signature");
        Err(TemboError::SignatureInvalid)
    }
}

/// First present header out of `names`.
fn header<'a>(headers: &'a HeaderMap, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
}
