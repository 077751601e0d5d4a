//! Loggable snapshots of failed provider calls.

use crate::payments::error::PaymentError;
use crate::payments::retry::is_retryable;
use crate::payments::utils::format_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Error payload returned in a provider's response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub status: u16,
    pub data: Option<ResponseBody>,
}

impl ProviderResponse {
    pub fn new(status: u16) -> Self {
        Self { status, data: None }
    }

    pub fn with_data(mut self, data: ResponseBody) -> Self {
        self.data = Some(data);
        self
    }
}

/// A failed call to a mobile-money provider.
///
/// `response` is `None` when the request never got an HTTP answer
/// (connection refused, DNS failure, client-side timeout).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub message: Option<String>,
    pub code: Option<String>,
    pub response: Option<ProviderResponse>,
}

impl ProviderFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_response(mut self, response: ProviderResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Builds a failure from an HTTP status and the provider's JSON body.
    pub fn from_response(status: u16, body: &JsonValue) -> Self {
        let data = ResponseBody {
            message: body
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            code: body.get("code").and_then(|v| match v {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        };
        let data = (data != ResponseBody::default()).then_some(data);
        Self {
            message: Some(format!("HTTP {}", status)),
            code: None,
            response: Some(ProviderResponse { status, data }),
        }
    }

    #[cfg(feature = "http")]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        Self {
            message: Some(err.to_string()),
            code: None,
            response: err.status().map(|s| ProviderResponse::new(s.as_u16())),
        }
    }

    fn body(&self) -> Option<&ResponseBody> {
        self.response.as_ref().and_then(|r| r.data.as_ref())
    }

    /// Body message, then the failure's own message, then `"Unknown error"`.
    pub fn resolved_message(&self) -> String {
        self.body()
            .and_then(|d| d.message.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
    }

    /// Body code, then the failure's own code.
    pub fn resolved_code(&self) -> Option<String> {
        self.body()
            .and_then(|d| d.code.clone())
            .or_else(|| self.code.clone())
    }

    pub fn status_code(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    pub fn into_payment_error(self, provider: &str) -> PaymentError {
        let message = self.resolved_message();
        match self.status_code() {
            None => PaymentError::NetworkError { message },
            Some(429) => PaymentError::RateLimitError {
                message,
                retry_after_seconds: None,
            },
            Some(status) => PaymentError::ProviderError {
                provider: provider.to_string(),
                message,
                provider_code: self.resolved_code().or_else(|| Some(status.to_string())),
                retryable: is_retryable(&self),
            },
        }
    }
}

#[cfg(feature = "http")]
impl From<&reqwest::Error> for ProviderFailure {
    fn from(err: &reqwest::Error) -> Self {
        ProviderFailure::from_reqwest(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub timestamp: String,
    pub retryable: bool,
}

pub fn describe_error(error: &ProviderFailure) -> ErrorDetails {
    describe_error_at(error, Utc::now())
}

pub fn describe_error_at(error: &ProviderFailure, now: DateTime<Utc>) -> ErrorDetails {
    let details = ErrorDetails {
        message: error.resolved_message(),
        code: error.resolved_code(),
        status_code: error.status_code(),
        timestamp: format_timestamp(now),
        retryable: is_retryable(error),
    };

    if details.retryable {
        debug!(
            message = %details.message,
            status_code = ?details.status_code,
            "provider call failed, retryable"
        );
    } else {
        warn!(
            message = %details.message,
            code = ?details.code,
            status_code = ?details.status_code,
            "provider call failed"
        );
    }

    details
}
