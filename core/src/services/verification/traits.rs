//! Trait seams between the verification core and infrastructure

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_record::VerificationRecord;

use super::payload::DeliveryPayload;

/// Delivery channel for verification codes (SMS or voice call)
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a payload to a phone number.
    ///
    /// Returns the provider's delivery identifier on success. Malformed
    /// phone numbers surface here as delivery failures; the core does not
    /// pre-validate number formats.
    async fn deliver(&self, phone: &str, payload: &DeliveryPayload) -> Result<String, String>;
}

/// Per-phone-number document storage for verification records
///
/// The store must provide last-write-wins semantics for full-document
/// writes and an atomic conditional update for the verify-time mutation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record, unconditionally replacing any existing record
    /// for the same phone number.
    async fn put(&self, record: &VerificationRecord) -> Result<(), String>;

    /// Fetch the record for a phone number, if one exists.
    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, String>;

    /// Atomically transition `verified` false→true and set `verified_at`.
    ///
    /// Returns `Ok(true)` if this call performed the transition, `Ok(false)`
    /// if the record was already verified or no longer exists. Two concurrent
    /// calls against the same pending record must not both observe `true`;
    /// a plain read-then-write is not an acceptable implementation.
    async fn mark_verified(
        &self,
        phone: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, String>;
}
