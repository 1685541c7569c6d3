use serde::Serialize;
use serde_json::Value;

use super::client::{prepare, with_callback_url};
use super::{AuthMode, TemboClient};
use crate::error::{StatusMapping, TemboResult};
use crate::models::CallbackKind;
use crate::validation::schemas;

impl TemboClient {
    /// Pays out from a wallet to a mobile money subscriber or bank account.
    pub async fn wallet_to_mobile<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::WALLET_TO_MOBILE, payload)?;
        let payload = with_callback_url(payload, self.callback_url(CallbackKind::WalletToMobile));

        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/payment/wallet-to-mobile",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    /// Pays a biller (electricity, water, TV and so on).
    pub async fn utility_payment<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::UTILITY_PAYMENT, payload)?;
        let payload = with_callback_url(payload, self.callback_url(CallbackKind::UtilityPayment));

        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/payment/biller",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn payment_status<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::TRANSACTION_STATUS, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/payment/status",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }
}
