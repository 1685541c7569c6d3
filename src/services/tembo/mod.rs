mod client;
mod collections;
mod ekyc;
mod merchant_accounts;
mod payments;
mod remittance;
mod wallets;
mod webhooks;

pub use client::{AuthMode, TemboClient};
pub use webhooks::*;
