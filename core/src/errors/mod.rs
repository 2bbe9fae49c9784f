//! Domain error types for the verification lifecycle

use thiserror::Error;

/// Errors surfaced by the verification service
///
/// The three verify-rejection kinds (`AlreadyUsed`, `Expired`,
/// `CodeMismatch`) are distinct so callers can tailor their UX
/// ("resend" vs "retry code"). None of the rejection variants mutate
/// the stored record.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Malformed or missing request field. Never has side effects.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// Verify attempted against a number with no stored record
    #[error("no verification code found for this phone number")]
    NotFound,

    /// The code was already consumed; replay is always rejected
    #[error("this verification code has already been used")]
    AlreadyUsed,

    /// The code's validity window has elapsed
    #[error("verification code has expired")]
    Expired,

    /// Submitted code does not match the stored one
    #[error("invalid verification code")]
    CodeMismatch,

    /// Notifier failure after the record was durably stored.
    ///
    /// The record remains valid: the client may retry verification if the
    /// code still reached them, or request a fresh issuance.
    #[error("failed to deliver verification code: {0}")]
    DeliveryFailed(String),

    /// Record store infrastructure failure
    #[error("verification store unavailable: {0}")]
    StoreUnavailable(String),
}

impl VerificationError {
    /// Convenience constructor for a missing required field
    pub fn missing(field: &'static str) -> Self {
        Self::InvalidArgument {
            field,
            reason: format!("{field} is required"),
        }
    }
}

pub type DomainResult<T> = Result<T, VerificationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = VerificationError::missing("phoneNumber");
        assert_eq!(
            err.to_string(),
            "invalid argument `phoneNumber`: phoneNumber is required"
        );
    }

    #[test]
    fn test_rejection_variants_are_distinct_messages() {
        let messages = [
            VerificationError::AlreadyUsed.to_string(),
            VerificationError::Expired.to_string(),
            VerificationError::CodeMismatch.to_string(),
            VerificationError::NotFound.to_string(),
        ];
        let unique = messages.iter().collect::<std::collections::HashSet<_>>();
        assert_eq!(unique.len(), messages.len());
    }
}
