use serde::Serialize;
use serde_json::Value;

use super::client::prepare;
use super::{AuthMode, TemboClient};
use crate::error::{StatusMapping, TemboResult};
use crate::validation::schemas;

impl TemboClient {
    pub async fn create_merchant_virtual_account<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> TemboResult<Value> {
        let payload = prepare(&schemas::CREATE_MERCHANT_ACCOUNT, payload)?;
        self.post(AuthMode::BearerToken, "/account", &payload, StatusMapping::STANDARD)
            .await
    }

    pub async fn account_balance<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::ACCOUNT_BALANCE, payload)?;
        self.post(
            AuthMode::BearerToken,
            "/account/balance",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn account_statement<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::ACCOUNT_STATEMENT, payload)?;
        self.post(
            AuthMode::BearerToken,
            "/account/statement",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }
}
