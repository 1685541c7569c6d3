use crate::error::{TemboError, TemboResult, ValidationErrors};

const COUNTRY_PREFIX: &str = "255";

/// Strips everything but digits and expands local numbers to the `255`
/// international form Tembo expects.
pub fn clean_mobile_number(mobile_number: &str) -> TemboResult<String> {
    let digits: String = mobile_number.chars().filter(|c| c.is_ascii_digit()).collect();

    if !(9..=12).contains(&digits.len()) {
        return Err(TemboError::Validation(ValidationErrors::new(vec![
            "Invalid mobile number".to_string(),
        ])));
    }

    let cleaned = match (digits.len(), digits.strip_prefix('0')) {
        (9, None) => format!("{}{}", COUNTRY_PREFIX, digits),
        (10, Some(local)) => format!("{}{}", COUNTRY_PREFIX, local),
        _ => digits,
    };

    Ok(cleaned)
}

/// Removes whitespace and thousands separators, e.g. `" 1,000.50 "` to
/// `"1000.50"`.
pub fn clean_amount(amount: &str) -> String {
    amount
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}
