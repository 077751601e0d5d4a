//! Mobile-money payment helpers
//!
//! Stateless building blocks used around MTN and Airtel Money integrations:
//! phone number handling, transaction references, retry decisions, amount
//! limits, status normalisation, payment expiry and user-facing error text.

pub mod amount;
pub mod callback;
pub mod error;
pub mod error_details;
pub mod expiry;
pub mod messages;
pub mod phone;
pub mod retry;
pub mod status;
pub mod transaction_id;
pub mod types;
pub mod utils;
