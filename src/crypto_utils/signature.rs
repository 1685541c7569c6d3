use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{TemboError, TemboResult};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 keyed once, usable for any number of messages.
#[derive(Clone)]
pub struct HmacSignature {
    mac: HmacSha256,
}

impl HmacSignature {
    pub fn new(key: &[u8]) -> TemboResult<Self> {
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|e| TemboError::Config(format!("HMAC initialization failed: {}", e)))?;

        Ok(Self { mac })
    }

    /// Key given as standard base64, the form Tembo hands out secrets in.
    pub fn from_base64_key(key_base64: &str) -> TemboResult<Self> {
        let key = STANDARD
            .decode(key_base64)
            .map_err(|e| TemboError::Config(format!("Signing key is not base64: {}", e)))?;

        Self::new(&key)
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }

    pub fn sign_base64(&self, message: &[u8]) -> String {
        STANDARD.encode(self.sign(message))
    }

    /// Constant-time comparison against a raw digest.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(signature).is_ok()
    }

    /// Anything that is not canonical base64 fails verification.
    pub fn verify_base64(&self, message: &[u8], signature_base64: &str) -> bool {
        match STANDARD.decode(signature_base64) {
            Ok(signature) => self.verify(message, &signature),
            Err(_) => false,
        }
    }
}
