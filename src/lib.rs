//! Client for the Tembo financial API plus receivers for the callbacks Tembo
//! posts back.

pub mod api;
pub mod config;
pub mod crypto_utils;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod validation;

use std::sync::Arc;

use config::Config;
use events::CallbackBroadcaster;

pub use error::{TemboError, TemboResult};
pub use services::{AuthMode, TemboClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub broadcaster: Arc<CallbackBroadcaster>,
}

impl AppState {
    pub fn new(config: Config, broadcaster: CallbackBroadcaster) -> Self {
        Self {
            config: Arc::new(config),
            broadcaster: Arc::new(broadcaster),
        }
    }
}
