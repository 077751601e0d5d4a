//! User-facing wording for raw provider error text.

pub const GENERIC_ERROR_MESSAGE: &str =
    "Payment failed. Please try again or use a different payment method.";

/// Matched top to bottom; the first phrase contained in the message wins.
const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    (
        "insufficient funds",
        "Insufficient balance. Please top up your mobile money account and try again.",
    ),
    (
        "insufficient balance",
        "Insufficient balance. Please top up your mobile money account and try again.",
    ),
    (
        "invalid phone",
        "Invalid phone number. Please check the number and try again.",
    ),
    (
        "payer not found",
        "This phone number is not registered for mobile money.",
    ),
    (
        "not registered",
        "This phone number is not registered for mobile money.",
    ),
    (
        "not allowed",
        "This transaction is not allowed. Please contact your mobile money provider.",
    ),
    (
        "limit exceeded",
        "Transaction limit exceeded. Please try a smaller amount.",
    ),
    (
        "expired",
        "The payment request expired. Please start the payment again.",
    ),
    (
        "timeout",
        "The payment request timed out. Please try again.",
    ),
    (
        "rejected",
        "The payment was declined. Please approve the prompt on your phone and try again.",
    ),
    ("cancelled", "The payment was cancelled."),
    (
        "network",
        "Network error. Please check your connection and try again.",
    ),
];

pub fn sanitize_error_message(error_message: &str) -> &'static str {
    let lowered = error_message.to_lowercase();
    FRIENDLY_MESSAGES
        .iter()
        .find(|(phrase, _)| lowered.contains(*phrase))
        .map_or(GENERIC_ERROR_MESSAGE, |(_, friendly)| *friendly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            sanitize_error_message("Insufficient Funds detected"),
            FRIENDLY_MESSAGES[0].1
        );
    }

    #[test]
    fn first_matching_phrase_wins() {
        // contains both "expired" and "timeout"
        assert_eq!(
            sanitize_error_message("request expired after timeout"),
            "The payment request expired. Please start the payment again."
        );
    }

    #[test]
    fn unknown_messages_fall_back_to_generic_text() {
        assert_eq!(sanitize_error_message("HTTP 418"), GENERIC_ERROR_MESSAGE);
        assert_eq!(sanitize_error_message(""), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn every_entry_is_reachable() {
        for (phrase, friendly) in FRIENDLY_MESSAGES {
            let resolved = sanitize_error_message(&phrase.to_uppercase());
            assert_eq!(resolved, *friendly, "phrase {:?}", phrase);
            assert!(!resolved.is_empty());
        }
    }
}
