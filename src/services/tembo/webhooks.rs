use crate::crypto_utils::HmacSignature;
use crate::error::TemboResult;
use crate::models::MerchantStatementEntry;

pub struct CallbackSignatureVerifier;

impl CallbackSignatureVerifier {
    /// Verify the signature Tembo attaches to merchant account callbacks.
    ///
    /// signature = base64(HMAC-SHA256(timestamp + statement fields, base64_decode(secret)))
    ///
    /// Returns `false` for a secret that is not valid base64.
    pub fn verify(
        secret_base64: &str,
        timestamp: &str,
        entry: &MerchantStatementEntry,
        received_signature: &str,
    ) -> bool {
        let Ok(signer) = HmacSignature::from_base64_key(secret_base64) else {
            tracing::warn!("Callback secret is not valid base64");
            return false;
        };

        let message = Self::canonical_message(timestamp, entry);
        let verified = signer.verify_base64(message.as_bytes(), received_signature);

        tracing::debug!(
            transaction_id = %entry.transaction_id,
            timestamp = timestamp,
            verified,
            "Merchant callback signature checked"
        );

        verified
    }

    /// Signature Tembo would send for `entry`, as base64.
    pub fn compute_signature(
        secret_base64: &str,
        timestamp: &str,
        entry: &MerchantStatementEntry,
    ) -> TemboResult<String> {
        let signer = HmacSignature::from_base64_key(secret_base64)?;
        Ok(signer.sign_base64(Self::canonical_message(timestamp, entry).as_bytes()))
    }

    /// Fields in signing order. Amounts are truncated toward zero, never
    /// rounded.
    pub fn canonical_message(timestamp: &str, entry: &MerchantStatementEntry) -> String {
        let mut message = String::with_capacity(256);

        for part in [
            timestamp,
            entry.account_no.as_str(),
            entry.id.as_str(),
            entry.transaction_id.as_str(),
            entry.reference.as_str(),
            entry.transaction_type.as_str(),
            entry.channel.as_str(),
            entry.transaction_date.as_str(),
            entry.posting_date.as_str(),
            entry.value_date.as_str(),
            entry.narration.as_str(),
            entry.currency.as_str(),
        ] {
            message.push_str(part);
        }

        for amount in [
            &entry.amount_credit,
            &entry.amount_debit,
            &entry.cleared_balance,
            &entry.booked_balance,
        ] {
            message.push_str(&amount.truncated().to_string());
        }

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    // base64("tembo-callback-secret")
    const SECRET: &str = "dGVtYm8tY2FsbGJhY2stc2VjcmV0";
    const TIMESTAMP: &str = "20250526101500";
    const GOLDEN: &str = "ZMLuvoVc1H9gfJjsk7TpQ3htNbz3JE/zxyCwcp9pNWU=";

    fn entry() -> MerchantStatementEntry {
        MerchantStatementEntry {
            account_no: "1234567890".to_string(),
            id: "abc123".to_string(),
            transaction_id: "txn789".to_string(),
            reference: "ref001".to_string(),
            transaction_type: "CREDIT".to_string(),
            channel: "MOBILE".to_string(),
            transaction_date: "2025-05-26".to_string(),
            posting_date: "2025-05-26".to_string(),
            value_date: "2025-05-26".to_string(),
            narration: "Payment for services".to_string(),
            currency: "USD".to_string(),
            amount_credit: Amount::from(1000.55),
            amount_debit: Amount::from(0_i64),
            cleared_balance: Amount::from(5000.75),
            booked_balance: Amount::from(6000.30),
            payer_name: Some("TEMBOPLUS COMPANY LIMITED".to_string()),
        }
    }

    #[test]
    fn test_canonical_message() {
        assert_eq!(
            CallbackSignatureVerifier::canonical_message(TIMESTAMP, &entry()),
            "202505261015001234567890abc123txn789ref001CREDITMOBILE2025-05-262025-05-262025-05-26Payment for servicesUSD1000050006000"
        );
    }

    #[test]
    fn test_golden_signature() {
        let signature =
            CallbackSignatureVerifier::compute_signature(SECRET, TIMESTAMP, &entry()).unwrap();
        assert_eq!(signature, GOLDEN);
        assert!(CallbackSignatureVerifier::verify(SECRET, TIMESTAMP, &entry(), GOLDEN));
    }

    #[test]
    fn test_single_character_mutations_are_rejected() {
        let alphabet = ['A', 'z', '0', '+', '/', '='];

        for position in 0..GOLDEN.len() {
            for replacement in alphabet {
                let mut mutated: Vec<char> = GOLDEN.chars().collect();
                if mutated[position] == replacement {
                    continue;
                }
                mutated[position] = replacement;
                let mutated: String = mutated.into_iter().collect();

                assert!(
                    !CallbackSignatureVerifier::verify(SECRET, TIMESTAMP, &entry(), &mutated),
                    "accepted {}",
                    mutated
                );
            }
        }
    }

    #[test]
    fn test_amounts_are_truncated_not_rounded() {
        assert_eq!(Amount::from(1000.99).truncated(), 1000);
        assert_eq!(Amount::from(0.5).truncated(), 0);
        assert_eq!(Amount::from(-5.9).truncated(), -5);

        let mut rounded_up = entry();
        rounded_up.amount_credit = Amount::from(1000.99);
        assert!(CallbackSignatureVerifier::verify(SECRET, TIMESTAMP, &rounded_up, GOLDEN));

        rounded_up.amount_credit = Amount::from(1001.0);
        assert!(!CallbackSignatureVerifier::verify(SECRET, TIMESTAMP, &rounded_up, GOLDEN));
    }

    #[test]
    fn test_large_integer_amounts_are_signed_exactly() {
        let mut large = entry();
        large.cleared_balance = Amount::from(9_007_199_254_740_993_i64);

        let message = CallbackSignatureVerifier::canonical_message(TIMESTAMP, &large);
        assert!(message.ends_with("USD1000090071992547409936000"));
    }

    #[test]
    fn test_tampered_fields_and_timestamp_are_rejected() {
        let mut tampered = entry();
        tampered.narration = "Payment for service".to_string();
        assert!(!CallbackSignatureVerifier::verify(SECRET, TIMESTAMP, &tampered, GOLDEN));
        assert!(!CallbackSignatureVerifier::verify(SECRET, "20250526101501", &entry(), GOLDEN));
    }

    #[test]
    fn test_invalid_secret_never_verifies() {
        assert!(!CallbackSignatureVerifier::verify("%%%", TIMESTAMP, &entry(), GOLDEN));
        assert!(CallbackSignatureVerifier::compute_signature("%%%", TIMESTAMP, &entry()).is_err());
    }
}
