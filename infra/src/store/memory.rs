//! In-memory verification record store
//!
//! Used for development and integration tests. The single mutex makes
//! `mark_verified` an atomic read-modify-write, so it honors the same
//! consume-at-most-once contract as the Redis implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use otp_core::domain::entities::verification_record::VerificationRecord;
use otp_core::services::verification::RecordStore;

/// HashMap-backed record store
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<String, VerificationRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the record for a phone number (test helper)
    pub fn record(&self, phone: &str) -> Option<VerificationRecord> {
        self.records.lock().unwrap().get(phone).cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        self.records
            .lock()
            .unwrap()
            .insert(record.phone.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, String> {
        Ok(self.records.lock().unwrap().get(phone).cloned())
    }

    async fn mark_verified(
        &self,
        phone: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, String> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(phone) {
            Some(record) if !record.verified => {
                record.verified = true;
                record.verified_at = Some(verified_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::domain::entities::verification_record::DeliveryMethod;

    fn record(phone: &str) -> VerificationRecord {
        VerificationRecord::new(phone.to_string(), DeliveryMethod::Sms)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryRecordStore::new();
        let rec = record("+819012345678");

        store.put(&rec).await.unwrap();
        assert_eq!(store.get("+819012345678").await.unwrap(), Some(rec));
        assert_eq!(store.get("+10000000000").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_record() {
        let store = InMemoryRecordStore::new();
        let first = record("+819012345678");
        let second = record("+819012345678");

        store.put(&first).await.unwrap();
        store.put(&second).await.unwrap();

        let stored = store.get("+819012345678").await.unwrap().unwrap();
        assert_eq!(stored.code, second.code);
    }

    #[tokio::test]
    async fn test_mark_verified_transitions_exactly_once() {
        let store = InMemoryRecordStore::new();
        let rec = record("+819012345678");
        store.put(&rec).await.unwrap();

        let now = Utc::now();
        assert!(store.mark_verified("+819012345678", now).await.unwrap());
        assert!(!store.mark_verified("+819012345678", now).await.unwrap());

        let stored = store.record("+819012345678").unwrap();
        assert!(stored.verified);
        assert_eq!(stored.verified_at, Some(now));
    }

    #[tokio::test]
    async fn test_mark_verified_missing_record_is_false() {
        let store = InMemoryRecordStore::new();
        assert!(!store.mark_verified("+819012345678", Utc::now()).await.unwrap());
    }
}
