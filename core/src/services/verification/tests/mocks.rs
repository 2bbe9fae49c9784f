//! Mock implementations for testing the verification service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::verification_record::VerificationRecord;
use crate::services::verification::payload::DeliveryPayload;
use crate::services::verification::traits::{Notifier, RecordStore};

// Mock notifier recording every delivery
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, DeliveryPayload)>>>,
    pub should_fail: bool,
}

impl MockNotifier {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> Option<DeliveryPayload> {
        self.sent.lock().unwrap().last().map(|(_, p)| p.clone())
    }

    /// Extract the 6-digit code from the most recent payload
    pub fn last_code(&self) -> Option<String> {
        self.last_payload().map(|payload| {
            let text = match payload {
                DeliveryPayload::Text(body) => body,
                DeliveryPayload::Voice(script) => script,
            };
            text.chars()
                .filter(|c| c.is_ascii_digit())
                .take(6)
                .collect()
        })
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn deliver(&self, phone: &str, payload: &DeliveryPayload) -> Result<String, String> {
        if self.should_fail {
            return Err("notifier error".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), payload.clone()));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

// Mock record store backed by a HashMap; the mutex makes mark_verified
// an atomic read-modify-write, matching the store contract.
pub struct MockRecordStore {
    pub records: Arc<Mutex<HashMap<String, VerificationRecord>>>,
    pub should_fail: bool,
}

impl MockRecordStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn record(&self, phone: &str) -> Option<VerificationRecord> {
        self.records.lock().unwrap().get(phone).cloned()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        if self.should_fail {
            return Err("store error".to_string());
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.phone.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, String> {
        if self.should_fail {
            return Err("store error".to_string());
        }
        Ok(self.records.lock().unwrap().get(phone).cloned())
    }

    async fn mark_verified(
        &self,
        phone: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<bool, String> {
        if self.should_fail {
            return Err("store error".to_string());
        }
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
