use serde::Serialize;
use serde_json::{json, Value};

use super::client::prepare;
use super::{AuthMode, TemboClient};
use crate::error::{StatusMapping, TemboResult};
use crate::validation::schemas;

impl TemboClient {
    /// Opens a customer wallet.
    pub async fn create_wallet<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::CREATE_WALLET, payload)?;
        self.post(AuthMode::SecretKey, "/tembo/v1/wallet", &payload, StatusMapping::STANDARD)
            .await
    }

    pub async fn deposit_funds<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::DEPOSIT_FUNDS, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/transaction/deposit",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn withdraw_funds<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::WITHDRAW_FUNDS, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/transaction/withdraw",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    /// Moves funds between two wallets.
    pub async fn wallet_transfer<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::WALLET_TRANSFER, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/transaction/transfer",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn wallet_balance<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::WALLET_BALANCE, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/wallet/balance",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn wallet_statement<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::WALLET_STATEMENT, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/wallet/statement",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    /// Balance of the integrator's main account.
    pub async fn main_balance(&self) -> TemboResult<Value> {
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/wallet/main-balance",
            &json!({}),
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn main_statement<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::MAIN_STATEMENT, payload)?;
        self.post(
            AuthMode::SecretKey,
            "/tembo/v1/wallet/main-statement",
            &payload,
            StatusMapping::STANDARD,
        )
        .await
    }

    pub async fn list_wallets(&self) -> TemboResult<Value> {
        self.get(AuthMode::SecretKey, "/tembo/v1/wallet", StatusMapping::STANDARD)
            .await
    }
}
