//! Provider status codes mapped onto [`PaymentStatus`].

use crate::payments::types::{MobileMoneyProvider, PaymentStatus};
use std::str::FromStr;
use tracing::debug;

const MTN_STATUSES: &[(&str, PaymentStatus)] = &[
    ("PENDING", PaymentStatus::Pending),
    ("SUCCESSFUL", PaymentStatus::Completed),
    ("FAILED", PaymentStatus::Failed),
    ("REJECTED", PaymentStatus::Failed),
    ("TIMEOUT", PaymentStatus::Failed),
];

const AIRTEL_STATUSES: &[(&str, PaymentStatus)] = &[
    ("TS", PaymentStatus::Completed),
    ("TF", PaymentStatus::Failed),
    ("TA", PaymentStatus::Pending),
    ("TIP", PaymentStatus::Pending),
    ("TE", PaymentStatus::Failed),
];

fn status_table(provider: MobileMoneyProvider) -> &'static [(&'static str, PaymentStatus)] {
    match provider {
        MobileMoneyProvider::Mtn => MTN_STATUSES,
        MobileMoneyProvider::Airtel => AIRTEL_STATUSES,
    }
}

/// Looks up a provider-native status code. Codes are matched exactly.
pub fn normalize_status(status: &str, provider: MobileMoneyProvider) -> Option<PaymentStatus> {
    status_table(provider)
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, normalized)| *normalized)
}

/// Maps a provider status onto `PENDING`, `COMPLETED` or `FAILED`.
///
/// Unknown providers and unknown codes are passed through unchanged so the
/// caller still sees what the provider reported.
pub fn map_status(status: &str, provider: &str) -> String {
    let mapped = MobileMoneyProvider::from_str(provider)
        .ok()
        .and_then(|provider| normalize_status(status, provider));
    match mapped {
        Some(normalized) => normalized.as_str().to_string(),
        None => {
            debug!(provider, status, "unmapped provider status passed through");
            status.to_string()
        }
    }
}
