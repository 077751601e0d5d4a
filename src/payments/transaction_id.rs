use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_PREFIX: &str = "TXN";

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIdConfig {
    pub prefix: String,
}

impl Default for TransactionIdConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl TransactionIdConfig {
    pub fn generate(&self, order_id: &str, provider: &str) -> String {
        compose(
            &self.prefix,
            provider,
            Utc::now().timestamp_millis(),
            order_id,
            &random_suffix(),
        )
    }
}

/// Builds `TXN-<PROVIDER>-<epoch millis>-<order id>-<6 base36 chars>`.
///
/// Uniqueness rests on the millisecond timestamp plus the random suffix; it is
/// not a cryptographic guarantee.
pub fn generate_transaction_id(order_id: &str, provider: &str) -> String {
    TransactionIdConfig::default().generate(order_id, provider)
}

fn compose(
    prefix: &str,
    provider: &str,
    timestamp_ms: i64,
    order_id: &str,
    suffix: &str,
) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        prefix,
        provider.to_uppercase(),
        timestamp_ms,
        order_id,
        suffix
    )
}

fn random_suffix() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        out.push(BASE36[(entropy % 36) as usize] as char);
        entropy /= 36;
    }
    out
}
