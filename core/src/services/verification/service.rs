//! Verification service - the OTP lifecycle state machine

use std::sync::Arc;

use chrono::Utc;

use otp_shared::utils::phone::mask_phone;

use crate::domain::entities::verification_record::{DeliveryMethod, VerificationRecord};
use crate::errors::{DomainResult, VerificationError};

use super::config::VerificationConfig;
use super::payload::DeliveryPayload;
use super::traits::{Notifier, RecordStore};
use super::types::{IssueOutcome, VerifyOutcome};

/// Verification service handling code issuance and verification
///
/// Stateless apart from the shared record store: any number of instances
/// can run concurrently. The only suspension points are the store and
/// notifier calls.
pub struct VerificationService<N: Notifier, S: RecordStore> {
    /// Delivery channel for codes
    notifier: Arc<N>,
    /// Record store, one document per phone number
    store: Arc<S>,
    /// Service configuration
    config: VerificationConfig,
}

impl<N: Notifier, S: RecordStore> VerificationService<N, S> {
    /// Create a new verification service
    pub fn new(notifier: Arc<N>, store: Arc<S>, config: VerificationConfig) -> Self {
        Self {
            notifier,
            store,
            config,
        }
    }

    /// Issue a verification code for a phone number
    ///
    /// Generates a fresh 6-digit code, persists the record (replacing any
    /// prior record for the number - last-issuance-wins is intentional:
    /// a resend invalidates the previous code and bounds its lifetime),
    /// then delivers the code over the requested channel.
    ///
    /// The record is durably written before delivery is attempted. A
    /// delivery failure therefore never leaves a "sent but not verifiable"
    /// state; the inverse, "stored but never delivered", simply expires
    /// unused.
    pub async fn issue(&self, phone: &str, method: Option<&str>) -> DomainResult<IssueOutcome> {
        if phone.is_empty() {
            return Err(VerificationError::missing("phoneNumber"));
        }
        let method = DeliveryMethod::parse(method).ok_or_else(|| {
            VerificationError::InvalidArgument {
                field: "method",
                reason: "method must be \"sms\" or \"voice\"".to_string(),
            }
        })?;

        let record = VerificationRecord::new_with_expiration(
            phone.to_string(),
            method,
            self.config.code_ttl_minutes,
        );

        self.store.put(&record).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone(phone),
                error = %e,
                event = "record_store_failed",
                "Failed to persist verification record"
            );
            VerificationError::StoreUnavailable(e)
        })?;

        tracing::info!(
            phone = %mask_phone(phone),
            method = method.as_str(),
            expires_at = %record.expires_at,
            event = "code_issued",
            "Stored pending verification record"
        );

        let payload = DeliveryPayload::for_code(method, &record.code);
        let delivery_id = self
            .notifier
            .deliver(phone, &payload)
            .await
            .map_err(|e| {
                // The record stays persisted; it expires unused if the
                // client never receives the code.
                tracing::error!(
                    phone = %mask_phone(phone),
                    method = method.as_str(),
                    error = %e,
                    event = "delivery_failed",
                    "Failed to deliver verification code"
                );
                VerificationError::DeliveryFailed(e)
            })?;

        tracing::info!(
            phone = %mask_phone(phone),
            method = method.as_str(),
            delivery_id = %delivery_id,
            event = "code_delivered",
            "Verification code sent"
        );

        Ok(IssueOutcome {
            delivery_id,
            method,
            expires_at: record.expires_at,
        })
    }

    /// Verify a submitted code for a phone number
    ///
    /// Checks run in strict order - inputs present, record exists, not yet
    /// used, not expired, code matches - and the first failure wins with no
    /// mutation. Only the success path writes: an atomic false→true
    /// transition of `verified` at the store, so concurrent duplicate
    /// submissions consume the code at most once.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerifyOutcome> {
        if phone.is_empty() {
            return Err(VerificationError::missing("phoneNumber"));
        }
        if code.is_empty() {
            return Err(VerificationError::missing("code"));
        }

        let record = self
            .store
            .get(phone)
            .await
            .map_err(VerificationError::StoreUnavailable)?
            .ok_or(VerificationError::NotFound)?;

        if record.verified {
            tracing::warn!(
                phone = %mask_phone(phone),
                event = "code_replayed",
                "Rejected verification attempt against a consumed code"
            );
            return Err(VerificationError::AlreadyUsed);
        }

        let now = Utc::now();
        if record.is_expired_at(now) {
            tracing::info!(
                phone = %mask_phone(phone),
                expired_at = %record.expires_at,
                event = "code_expired",
                "Rejected verification attempt against an expired code"
            );
            return Err(VerificationError::Expired);
        }

        if !record.matches(code) {
            tracing::warn!(
                phone = %mask_phone(phone),
                event = "code_mismatch",
                "Rejected verification attempt with a wrong code"
            );
            return Err(VerificationError::CodeMismatch);
        }

        // Conditional update at the store closes the race between
        // concurrent duplicate submissions: exactly one caller observes
        // the false→true transition.
        let transitioned = self
            .store
            .mark_verified(phone, now)
            .await
            .map_err(VerificationError::StoreUnavailable)?;
        if !transitioned {
            return Err(VerificationError::AlreadyUsed);
        }

        tracing::info!(
            phone = %mask_phone(phone),
            event = "code_verified",
            "Verification successful"
        );

        Ok(VerifyOutcome {
            phone: phone.to_string(),
            verified_at: now,
        })
    }
}
