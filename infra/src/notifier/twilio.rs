//! Twilio notifier implementation
//!
//! Sends text payloads through the Messages API and voice payloads through
//! the Calls API with inline TwiML. Talks to the REST API directly over
//! `reqwest`; the Calls endpoint needs the inline `Twiml` form parameter,
//! which SDK wrappers don't expose.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use otp_core::services::verification::{DeliveryPayload, Notifier};
use otp_shared::utils::phone::mask_phone;

use crate::InfrastructureError;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Twilio notifier configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Subset of a Twilio API response we care about
#[derive(Debug, Deserialize)]
struct TwilioResponse {
    /// Delivery identifier (message or call SID)
    sid: Option<String>,
    /// Error description on failure responses
    message: Option<String>,
}

/// Twilio implementation of the notifier seam
pub struct TwilioNotifier {
    http: Client,
    config: TwilioConfig,
}

impl TwilioNotifier {
    /// Create a new Twilio notifier
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio notifier initialized with from number: {}",
            mask_phone(&config.from_number)
        );
        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(TwilioConfig::from_env()?)
    }

    async fn send_message(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        self.post_form("Messages.json", &[("To", to), ("From", &self.config.from_number), ("Body", body)])
            .await
    }

    async fn place_call(&self, to: &str, script: &str) -> Result<String, InfrastructureError> {
        let twiml = voice_twiml(script);
        self.post_form("Calls.json", &[("To", to), ("From", &self.config.from_number), ("Twiml", &twiml)])
            .await
    }

    async fn post_form(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<String, InfrastructureError> {
        let url = format!(
            "{}/Accounts/{}/{}",
            TWILIO_API_BASE, self.config.account_sid, resource
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(params)
            .send()
            .await?;

        let status = response.status();
        let body: TwilioResponse = response.json().await?;

        if !status.is_success() {
            let reason = body.message.unwrap_or_else(|| "no error detail".to_string());
            error!("Twilio request to {} failed with {}: {}", resource, status, reason);
            return Err(InfrastructureError::Notifier(format!(
                "Twilio returned {status}: {reason}"
            )));
        }

        body.sid.ok_or_else(|| {
            InfrastructureError::Notifier("Twilio response missing delivery sid".to_string())
        })
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn deliver(&self, phone: &str, payload: &DeliveryPayload) -> Result<String, String> {
        let result = match payload {
            DeliveryPayload::Text(body) => self.send_message(phone, body).await,
            DeliveryPayload::Voice(script) => self.place_call(phone, script).await,
        };

        match &result {
            Ok(sid) => info!(
                phone = %mask_phone(phone),
                sid = %sid,
                voice = payload.is_voice(),
                "Delivered verification payload via Twilio"
            ),
            Err(e) => error!(
                phone = %mask_phone(phone),
                error = %e,
                "Twilio delivery failed"
            ),
        }

        result.map_err(|e| e.to_string())
    }
}

/// Wrap a spoken script in a minimal TwiML document
fn voice_twiml(script: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Say>{}</Say></Response>",
        xml_escape(script)
    )
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
