//! Rwandan mobile-money phone number (MSISDN) handling.
//!
//! Numbers arrive as `+2507XXXXXXXX`, `2507XXXXXXXX`, `07XXXXXXXX` or the bare
//! 9-digit local number, optionally with spaces, hyphens or parentheses. The
//! canonical form is `250` followed by the 9-digit subscriber number.

use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::types::MobileMoneyProvider;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

pub const COUNTRY_CODE: &str = "250";

/// Length of a canonical MSISDN: country code plus 9 subscriber digits.
pub const CANONICAL_LENGTH: usize = 12;

static RWANDA_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+?250|0)?7[238]\d{7}$").expect("valid phone regex"));

fn strip_separators(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Returns `true` for MTN and Airtel Rwanda numbers in any accepted format.
pub fn validate_phone(phone: &str) -> bool {
    let cleaned = strip_separators(phone);
    if cleaned.is_empty() {
        return false;
    }
    RWANDA_MOBILE.is_match(&cleaned)
}

/// Rewrites a phone number into the `2507XXXXXXXX` form.
///
/// The result is not re-validated: malformed input yields a deterministic,
/// equally malformed output. Use [`Msisdn::parse`] when validity matters.
pub fn normalize_phone(phone: &str) -> String {
    let cleaned = strip_separators(phone);
    let local = if let Some(rest) = cleaned.strip_prefix("+250") {
        rest
    } else if let Some(rest) = cleaned.strip_prefix(COUNTRY_CODE) {
        rest
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        rest
    } else {
        cleaned.as_str()
    };
    format!("{}{}", COUNTRY_CODE, local)
}

/// Masks a phone number for logging: first 6 characters, `XXX`, last 2.
///
/// Masking is positional and does not look at the number's format.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 8 {
        return "***".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}XXX{}", head, tail)
}

/// Identifies the network operator from the number's prefix.
pub fn detect_operator(phone: &str) -> Option<MobileMoneyProvider> {
    if !validate_phone(phone) {
        return None;
    }
    let canonical = normalize_phone(phone);
    match canonical.get(3..5) {
        Some("78") => Some(MobileMoneyProvider::Mtn),
        Some("72") | Some("73") => Some(MobileMoneyProvider::Airtel),
        _ => None,
    }
}

/// A validated phone number held in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Msisdn(String);

impl Msisdn {
    pub fn parse(raw: &str) -> PaymentResult<Self> {
        if !validate_phone(raw) {
            return Err(PaymentError::InvalidPhoneNumber {
                message: format!("{} is not a valid Rwandan mobile number", mask_phone(raw)),
            });
        }
        let canonical = normalize_phone(raw);
        debug_assert_eq!(canonical.len(), CANONICAL_LENGTH);
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }

    /// The number as dialled locally, e.g. `0788123456`.
    pub fn local_format(&self) -> String {
        format!("0{}", &self.0[COUNTRY_CODE.len()..])
    }

    pub fn operator(&self) -> Option<MobileMoneyProvider> {
        detect_operator(&self.0)
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Msisdn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
