//! DTOs for the verification endpoints
//!
//! Wire fields are camelCase. Required fields use `#[serde(default)]` so a
//! missing field surfaces as our own "field is required" response rather
//! than a deserializer error. Phone number format beyond "non-empty" is
//! deliberately not validated here; malformed numbers surface as delivery
//! failures from the provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequest {
    /// Destination phone number in E.164 format (e.g. "+819012345678")
    #[serde(default)]
    #[validate(length(min = 1, message = "phoneNumber is required"))]
    pub phone_number: String,

    /// Delivery method: "sms" or "voice". Defaults to "sms".
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    /// Phone number the code was issued for
    #[serde(default)]
    #[validate(length(min = 1, message = "phoneNumber is required"))]
    pub phone_number: String,

    /// The submitted verification code (matched exactly, no normalization)
    #[serde(default)]
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub message: String,
    /// Delivery identifier from the provider
    pub delivery_id: String,
    /// When the issued code expires (ISO-8601)
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub message: String,
    /// Echo of the verified phone number
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_requires_phone() {
        let request: SendCodeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());

        let request: SendCodeRequest =
            serde_json::from_str(r#"{"phoneNumber": "+819012345678"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.method, None);
    }

    #[test]
    fn test_verify_code_request_requires_both_fields() {
        let request: VerifyCodeRequest =
            serde_json::from_str(r#"{"phoneNumber": "+819012345678"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: VerifyCodeRequest =
            serde_json::from_str(r#"{"phoneNumber": "+819012345678", "code": "123456"}"#)
                .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let response = SendCodeResponse {
            message: "sent".to_string(),
            delivery_id: "SM123".to_string(),
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("deliveryId").is_some());
        assert!(json.get("expiresAt").is_some());
    }
}
