pub mod tembo;

pub use tembo::{AuthMode, CallbackSignatureVerifier, TemboClient};
