use serde::Serialize;
use serde_json::Value;

use super::client::{prepare, with_callback_url};
use super::{AuthMode, TemboClient};
use crate::error::{StatusMapping, TemboResult};
use crate::models::CallbackKind;
use crate::validation::schemas;

impl TemboClient {
    /// Submits a cross-border transfer. Tembo posts the final status to the
    /// remittance callback.
    pub async fn create_remittance<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::CREATE_REMITTANCE, payload)?;
        let payload = with_callback_url(payload, self.callback_url(CallbackKind::Remittance));

        self.post(
            AuthMode::BearerToken,
            "/remittance",
            &payload,
            StatusMapping::REMITTANCE,
        )
        .await
    }

    pub async fn remittance_status<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::REMITTANCE_STATUS, payload)?;
        let partner_reference = payload["partnerReference"].as_str().unwrap_or_default();

        self.get(
            AuthMode::BearerToken,
            &format!("/remittance/{}/status", urlencoding::encode(partner_reference)),
            StatusMapping::REMITTANCE_STATUS,
        )
        .await
    }
}
