//! Parsing of provider status callbacks into normalized status updates.

use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::phone::mask_phone;
use crate::payments::status::normalize_status;
use crate::payments::types::{MobileMoneyProvider, PaymentStatus};
use crate::payments::utils::format_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MtnCallback {
    financial_transaction_id: Option<String>,
    external_id: Option<String>,
    status: String,
    payer: Option<MtnParty>,
    reason: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MtnParty {
    party_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirtelCallback {
    transaction: AirtelTransaction,
}

#[derive(Debug, Deserialize)]
struct AirtelTransaction {
    id: Option<String>,
    message: Option<String>,
    status_code: String,
    airtel_money_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub provider: MobileMoneyProvider,
    /// Our reference, echoed back by the provider.
    pub transaction_reference: Option<String>,
    pub provider_reference: Option<String>,
    pub raw_status: String,
    /// `None` when the provider sent a code we do not recognise.
    pub status: Option<PaymentStatus>,
    pub reason: Option<String>,
    pub received_at: String,
}

impl StatusUpdate {
    pub fn is_final(&self) -> bool {
        self.status.map(|s| s.is_terminal()).unwrap_or(false)
    }
}

pub fn parse_status_callback(
    provider: MobileMoneyProvider,
    payload: &[u8],
) -> PaymentResult<StatusUpdate> {
    let invalid = |e: serde_json::Error| PaymentError::ValidationError {
        message: format!("invalid {} callback payload: {}", provider, e),
        field: Some("body".to_string()),
    };

    let update = match provider {
        MobileMoneyProvider::Mtn => {
            let body: MtnCallback = serde_json::from_slice(payload).map_err(invalid)?;
            if let Some(party) = body.payer.as_ref().and_then(|p| p.party_id.as_deref()) {
                info!(payer = %mask_phone(party), status = %body.status, "mtn callback received");
            }
            StatusUpdate {
                provider,
                transaction_reference: body.external_id,
                provider_reference: body.financial_transaction_id,
                status: normalize_status(&body.status, provider),
                raw_status: body.status,
                reason: body.reason.map(reason_text),
                received_at: format_timestamp(chrono::Utc::now()),
            }
        }
        MobileMoneyProvider::Airtel => {
            let body: AirtelCallback = serde_json::from_slice(payload).map_err(invalid)?;
            let tx = body.transaction;
            StatusUpdate {
                provider,
                transaction_reference: tx.id,
                provider_reference: tx.airtel_money_id,
                status: normalize_status(&tx.status_code, provider),
                raw_status: tx.status_code,
                reason: tx.message,
                received_at: format_timestamp(chrono::Utc::now()),
            }
        }
    };

    if update.status.is_none() {
        warn!(
            provider = %update.provider,
            raw_status = %update.raw_status,
            "callback carried an unrecognised status code"
        );
    }

    Ok(update)
}

fn reason_text(reason: JsonValue) -> String {
    match reason {
        JsonValue::String(s) => s,
        JsonValue::Object(ref map) => map
            .get("message")
            .or_else(|| map.get("code"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| reason.to_string()),
        other => other.to_string(),
    }
}
