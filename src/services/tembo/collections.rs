use serde::Serialize;
use serde_json::{json, Value};

use super::client::{prepare, with_callback_url};
use super::{AuthMode, TemboClient};
use crate::error::{StatusMapping, TemboResult};
use crate::models::CallbackKind;
use crate::validation::schemas;

impl TemboClient {
    /// Sends a USSD push asking the subscriber to approve a payment. The
    /// outcome is posted to the wallet-to-mobile callback.
    pub async fn collect_ussd_push<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::USSD_PUSH, payload)?;
        let payload = with_callback_url(payload, self.callback_url(CallbackKind::WalletToMobile));

        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/collection",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn collection_balance(&self) -> TemboResult<Value> {
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/wallet/collection-balance",
            &json!({}),
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn collection_statement<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> TemboResult<Value> {
        let payload = prepare(&schemas::COLLECTION_STATEMENT, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/wallet/collection-statement",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn collection_payment_status<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> TemboResult<Value> {
        let payload = prepare(&schemas::TRANSACTION_STATUS, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/collection/status",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }
}
