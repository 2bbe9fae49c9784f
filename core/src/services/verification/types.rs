//! Result types for the verification service

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_record::DeliveryMethod;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// Delivery identifier returned by the notifier
    pub delivery_id: String,
    /// Channel the code was sent over
    pub method: DeliveryMethod,
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// The phone number that was verified
    pub phone: String,
    /// When the verification happened
    pub verified_at: DateTime<Utc>,
}
