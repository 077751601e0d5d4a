pub mod config;
pub mod logging;
pub mod payments;

pub use config::{ConfigError, PaymentConfig};
pub use payments::amount::{validate_amount, AmountLimits};
pub use payments::callback::{parse_status_callback, StatusUpdate};
pub use payments::error::{PaymentError, PaymentResult};
pub use payments::error_details::{
    describe_error, ErrorDetails, ProviderFailure, ProviderResponse, ResponseBody,
};
pub use payments::expiry::{compute_timeout, is_expired, TimeoutPolicy};
pub use payments::messages::sanitize_error_message;
pub use payments::phone::{detect_operator, mask_phone, normalize_phone, validate_phone, Msisdn};
pub use payments::retry::{backoff_delay, is_retryable, RetryPolicy};
pub use payments::status::{map_status, normalize_status};
pub use payments::transaction_id::generate_transaction_id;
pub use payments::types::{MobileMoneyProvider, PaymentStatus, TimeoutSpec, ValidationResult};
