//! Mock notifier for development and integration tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

use otp_core::services::verification::{DeliveryPayload, Notifier};
use otp_shared::utils::phone::mask_phone;

/// Notifier that records deliveries instead of sending them
#[derive(Default)]
pub struct MockNotifier {
    deliveries: Arc<Mutex<Vec<(String, DeliveryPayload)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded deliveries, oldest first
    pub fn deliveries(&self) -> Vec<(String, DeliveryPayload)> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Extract the 6-digit code from the most recent delivery to a number
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, payload)| {
                let text = match payload {
                    DeliveryPayload::Text(body) => body,
                    DeliveryPayload::Voice(script) => script,
                };
                text.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
            })
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn deliver(&self, phone: &str, payload: &DeliveryPayload) -> Result<String, String> {
        info!(
            phone = %mask_phone(phone),
            voice = payload.is_voice(),
            "Mock notifier recorded a delivery"
        );
        self.deliveries
            .lock()
            .unwrap()
            .push((phone.to_string(), payload.clone()));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_deliveries_and_extracts_codes() {
        let notifier = MockNotifier::new();

        let payload = DeliveryPayload::Text("Your verification code is: 123456".to_string());
        let sid = notifier.deliver("+819012345678", &payload).await.unwrap();
        assert!(sid.starts_with("mock-msg-"));

        assert_eq!(notifier.deliveries().len(), 1);
        assert_eq!(
            notifier.last_code_for("+819012345678").as_deref(),
            Some("123456")
        );
        assert_eq!(notifier.last_code_for("+10000000000"), None);
    }
}
