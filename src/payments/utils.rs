use crate::payments::error::{PaymentError, PaymentResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Checks a hex-encoded HMAC-SHA256 of `payload`. A leading `sha256=` on the
/// signature is accepted.
pub fn verify_hmac_sha256_hex(payload: &[u8], secret: &str, signature: &str) -> bool {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(v) => v,
        Err(_) => return false,
    };
    mac.update(payload);
    let computed = hex::encode(mac.finalize().into_bytes());
    let provided = signature.trim();
    let provided = provided.strip_prefix("sha256=").unwrap_or(provided);
    secure_eq(computed.as_bytes(), provided.to_ascii_lowercase().as_bytes())
}

pub fn verify_callback_signature(
    payload: &[u8],
    secret: &str,
    signature: Option<&str>,
) -> PaymentResult<()> {
    let signature = signature.ok_or_else(|| PaymentError::CallbackVerificationError {
        message: "missing callback signature".to_string(),
    })?;
    if secret.is_empty() {
        return Err(PaymentError::CallbackVerificationError {
            message: "callback secret is not configured".to_string(),
        });
    }
    if !verify_hmac_sha256_hex(payload, secret, signature) {
        return Err(PaymentError::CallbackVerificationError {
            message: "callback signature mismatch".to_string(),
        });
    }
    Ok(())
}

/// Constant-time byte comparison.
pub fn secure_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0_u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
