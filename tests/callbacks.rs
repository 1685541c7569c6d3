use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tembo_gateway::api::create_router;
use tembo_gateway::config::{Config, Environment, ServerConfig, TemboConfig};
use tembo_gateway::events::CallbackBroadcaster;
use tembo_gateway::models::{CallbackKind, MerchantStatementEntry};
use tembo_gateway::services::CallbackSignatureVerifier;
use tembo_gateway::AppState;
use tokio::sync::broadcast::error::TryRecvError;
use tower::ServiceExt;

// base64("tembo-callback-secret")
const SECRET: &str = "dGVtYm8tY2FsbGJhY2stc2VjcmV0";
const TIMESTAMP: &str = "20250526101500";

fn app() -> (Router, CallbackBroadcaster) {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        tembo: TemboConfig::new("acc-1", "secret-1", "token-1", Environment::Sandbox)
            .with_callback_secret(SECRET),
    };

    let broadcaster = CallbackBroadcaster::new();
    let router = create_router(AppState::new(config, broadcaster.clone()));
    (router, broadcaster)
}

fn merchant_payload() -> Value {
    json!({
        "accountNo": "1234567890",
        "payerName": "TEMBOPLUS COMPANY LIMITED",
        "id": "abc123",
        "transactionId": "txn789",
        "reference": "ref001",
        "transactionType": "CREDIT",
        "channel": "MOBILE",
        "transactionDate": "2025-05-26",
        "postingDate": "2025-05-26",
        "valueDate": "2025-05-26",
        "currency": "USD",
        "narration": "Payment for services",
        "amountCredit": 1000.55,
        "amountDebit": 0,
        "clearedBalance": 5000.75,
        "bookedBalance": 6000.30
    })
}

fn signature_for(payload: &Value) -> String {
    let entry: MerchantStatementEntry = serde_json::from_value(payload.clone()).unwrap();
    CallbackSignatureVerifier::compute_signature(SECRET, TIMESTAMP, &entry).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn signed_merchant_callback_is_accepted_and_published_once() {
    let (router, broadcaster) = app();
    let mut events = broadcaster.subscribe();
    let payload = merchant_payload();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .header("content-type", "application/json")
        .header("x-request-id", "cb-req-1")
        .header("x-tembo-timestamp", TIMESTAMP)
        .header("x-tembo-signature", signature_for(&payload))
        .body(Body::from(payload.to_string()))
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Callback received successfully"})
    );

    let event = events.try_recv().unwrap();
    assert_eq!(event.kind, CallbackKind::Merchant);
    assert_eq!(event.payload, payload);
    assert_eq!(event.request_id.as_deref(), Some("cb-req-1"));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn legacy_signature_headers_are_accepted() {
    let (router, _broadcaster) = app();
    let payload = merchant_payload();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .header("x-request-timestamp", TIMESTAMP)
        .header("x-request-signature", signature_for(&payload))
        .body(Body::from(payload.to_string()))
        .unwrap();

    let (status, _) = send(router, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_merchant_callback_is_unprocessable() {
    let (router, broadcaster) = app();
    let mut events = broadcaster.subscribe();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .header("x-tembo-timestamp", TIMESTAMP)
        .header("x-tembo-signature", "irrelevant")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn empty_json_object_lists_every_missing_field() {
    let (router, _broadcaster) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .body(Body::from("{}"))
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 16);
    assert_eq!(errors[0], "The account no field is required.");
    assert_eq!(body["message"], errors[0]);
}

#[tokio::test]
async fn tampered_signature_is_unauthorized() {
    let (router, broadcaster) = app();
    let mut events = broadcaster.subscribe();
    let payload = merchant_payload();

    let mut signature = signature_for(&payload);
    let first = if signature.starts_with('A') { "B" } else { "A" };
    signature.replace_range(0..1, first);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .header("x-tembo-timestamp", TIMESTAMP)
        .header("x-tembo-signature", signature)
        .body(Body::from(payload.to_string()))
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "Invalid signature"}));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn tampered_body_is_unauthorized() {
    let (router, _broadcaster) = app();
    let payload = merchant_payload();
    let signature = signature_for(&payload);

    let mut tampered = payload.clone();
    tampered["amountCredit"] = json!(9000);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .header("x-tembo-timestamp", TIMESTAMP)
        .header("x-tembo-signature", signature)
        .body(Body::from(tampered.to_string()))
        .unwrap();

    let (status, _) = send(router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_signature_headers_are_unauthorized() {
    let (router, _broadcaster) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/merchant/callback")
        .body(Body::from(merchant_payload().to_string()))
        .unwrap();

    let (status, _) = send(router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn payout_callbacks_are_accepted_without_signature() {
    let payload = json!({
        "statusCode": "PAYMENT_ACCEPTED",
        "transactionRef": "TX-2001",
        "transactionId": "TMB-88"
    });

    for kind in [CallbackKind::WalletToMobile, CallbackKind::UtilityPayment] {
        let (router, broadcaster) = app();
        let mut events = broadcaster.subscribe();

        let request = Request::builder()
            .method("POST")
            .uri(kind.path())
            .body(Body::from(payload.to_string()))
            .unwrap();

        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK, "{:?}", kind);
        assert_eq!(body["success"], true);
        assert_eq!(events.try_recv().unwrap().kind, kind);
    }
}

#[tokio::test]
async fn payout_callback_missing_fields_is_unprocessable() {
    let (router, _broadcaster) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/wallet-to-mobile/callback")
        .body(Body::from(json!({"transactionRef": "TX-2001"}).to_string()))
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"],
        json!([
            "The status code field is required.",
            "The transaction id field is required."
        ])
    );
}

#[tokio::test]
async fn remittance_callback_is_accepted() {
    let (router, broadcaster) = app();
    let mut events = broadcaster.subscribe();

    let payload = json!({
        "transactionId": "TMB-RMT-1",
        "paymentDate": "2025-05-26T10:15:00Z",
        "senderCurrency": "USD",
        "senderAmount": 100,
        "receiverCurrency": "TZS",
        "receiverAmount": 270000,
        "exchangeRate": 2700,
        "transactionFee": 0,
        "transactionAmount": 270000,
        "transactionDate": "2025-05-26T10:15:05Z",
        "receiverAccount": "255745908755",
        "receiverChannel": "MOBILE",
        "institutionCode": "TZ-AIRTEL",
        "partnerReference": "HSC8474837-VS83",
        "institutionReference": "AIR-5521",
        "status": "COMPLETED",
        "statusCode": "PAYMENT_ACCEPTED",
        "statusMessage": "Completed",
        "receiptNumber": "RCPT-1",
        "createdAt": "2025-05-26T10:15:00Z",
        "updatedAt": "2025-05-26T10:16:00Z",
        "completedAt": "2025-05-26T10:16:00Z"
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/remittance/callback")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.try_recv().unwrap().payload, payload);
}

#[tokio::test]
async fn malformed_remittance_callback_is_unprocessable() {
    let (router, _broadcaster) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/remittance/callback")
        .body(Body::from("not json"))
        .unwrap();

    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "The request body must be valid JSON.");
}

#[tokio::test]
async fn health_reports_environment() {
    let (router, _broadcaster) = app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "sandbox");
}
