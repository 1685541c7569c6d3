use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{schemas, Schema};

/// The four asynchronous notifications Tembo posts back to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    Merchant,
    WalletToMobile,
    UtilityPayment,
    Remittance,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 4] = [
        CallbackKind::Merchant,
        CallbackKind::WalletToMobile,
        CallbackKind::UtilityPayment,
        CallbackKind::Remittance,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            CallbackKind::Merchant => "/api/v1/merchant/callback",
            CallbackKind::WalletToMobile => "/api/v1/wallet-to-mobile/callback",
            CallbackKind::UtilityPayment => "/api/v1/utility-payment/callback",
            CallbackKind::Remittance => "/api/v1/remittance/callback",
        }
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            CallbackKind::Merchant => &schemas::MERCHANT_CALLBACK,
            CallbackKind::WalletToMobile => &schemas::WALLET_TO_MOBILE_CALLBACK,
            CallbackKind::UtilityPayment => &schemas::UTILITY_PAYMENT_CALLBACK,
            CallbackKind::Remittance => &schemas::REMITTANCE_CALLBACK,
        }
    }

    /// Only merchant account statements arrive signed.
    pub fn requires_signature(&self) -> bool {
        matches!(self, CallbackKind::Merchant)
    }
}

/// A validated callback, handed to whoever subscribed to the broadcaster.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackEvent {
    pub kind: CallbackKind,
    pub payload: serde_json::Value,
    pub request_id: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl CallbackEvent {
    pub fn new(kind: CallbackKind, payload: serde_json::Value, request_id: Option<String>) -> Self {
        Self {
            kind,
            payload,
            request_id,
            received_at: Utc::now(),
        }
    }
}

/// Statement entry posted to the merchant callback. Field order here is the
/// order the signature covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantStatementEntry {
    pub account_no: String,
    pub id: String,
    pub transaction_id: String,
    pub reference: String,
    pub transaction_type: String,
    pub channel: String,
    pub transaction_date: String,
    pub posting_date: String,
    pub value_date: String,
    pub narration: String,
    pub currency: String,
    pub amount_credit: Amount,
    pub amount_debit: Amount,
    pub cleared_balance: Amount,
    pub booked_balance: Amount,
    #[serde(default)]
    pub payer_name: Option<String>,
}

/// Statement amount as sent. Integers stay exact; only fractional values go
/// through `f64`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Amount(serde_json::Number);

impl Amount {
    /// Whole units, truncated toward zero.
    pub fn truncated(&self) -> i64 {
        match self.0.as_i64() {
            Some(whole) => whole,
            None => self.0.as_f64().map(|value| value.trunc() as i64).unwrap_or_default(),
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(value.into())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Amount)
            .unwrap_or_else(|| Amount(0.into()))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(number) => Ok(Amount(number)),
            Raw::Text(text) => {
                let trimmed = text.trim();
                if let Ok(whole) = trimmed.parse::<i64>() {
                    return Ok(Amount::from(whole));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Amount)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", text)))
            }
        }
    }
}
