//! Configuration for the verification service

use crate::domain::entities::verification_record::CODE_TTL_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of minutes before an issued code expires
    pub code_ttl_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: CODE_TTL_MINUTES,
        }
    }
}
