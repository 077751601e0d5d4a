use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::types::ValidationResult;

/// Smallest accepted payment, in RWF.
pub const DEFAULT_MIN_AMOUNT: f64 = 100.0;
/// Largest accepted payment, in RWF.
pub const DEFAULT_MAX_AMOUNT: f64 = 10_000_000.0;

pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount";
pub const BELOW_MINIMUM_MESSAGE: &str = "Amount is below the minimum allowed";

/// Inclusive bounds for a payment amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for AmountLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_AMOUNT,
            max: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl AmountLimits {
    pub fn validate(&self, amount: f64) -> ValidationResult {
        validate_amount(amount, self.min, self.max)
    }

    /// Same checks as [`AmountLimits::validate`], as a `PaymentError`.
    pub fn check(&self, amount: f64) -> PaymentResult<()> {
        match self.validate(amount) {
            ValidationResult { valid: true, .. } => Ok(()),
            ValidationResult { error, .. } => Err(PaymentError::ValidationError {
                message: error.unwrap_or_else(|| INVALID_AMOUNT_MESSAGE.to_string()),
                field: Some("amount".to_string()),
            }),
        }
    }
}

/// Checks `amount` against the inclusive `[min, max]` range.
///
/// Zero and non-finite values are rejected as invalid before the bounds are
/// considered.
pub fn validate_amount(amount: f64, min: f64, max: f64) -> ValidationResult {
    if amount == 0.0 || !amount.is_finite() {
        return ValidationResult::invalid(INVALID_AMOUNT_MESSAGE);
    }
    if amount < min {
        return ValidationResult::invalid(BELOW_MINIMUM_MESSAGE);
    }
    if amount > max {
        return ValidationResult::invalid(format!("Amount exceeds maximum limit of {}", max));
    }
    ValidationResult::ok()
}
