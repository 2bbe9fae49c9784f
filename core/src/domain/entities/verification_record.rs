//! Verification record entity - one pending or consumed code per phone number.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Validity window for an issued code (5 minutes)
pub const CODE_TTL_MINUTES: i64 = 5;

/// Delivery channel for a verification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Text message
    Sms,
    /// Voice call with spoken digit playback
    Voice,
}

impl DeliveryMethod {
    /// Parse a client-supplied method name. `None` falls back to SMS.
    ///
    /// Returns `None` for unrecognized names so the caller can reject them
    /// as a client error rather than silently defaulting.
    pub fn parse(method: Option<&str>) -> Option<Self> {
        match method {
            None => Some(Self::Sms),
            Some("sms") => Some(Self::Sms),
            Some("voice") => Some(Self::Voice),
            Some(_) => None,
        }
    }

    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Voice => "voice",
        }
    }
}

impl Default for DeliveryMethod {
    fn default() -> Self {
        Self::Sms
    }
}

/// Verification record for phone-number OTP authentication
///
/// The phone number is the natural key: issuing a new code for a number
/// replaces any prior record, so at most one live record exists per number.
/// `verified` is write-once; the false→true transition is performed by the
/// record store's conditional update, never by mutating a stale copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Phone number the code was sent to (E.164 format), the record key
    pub phone: String,

    /// The 6-digit verification code
    pub code: String,

    /// Channel the code was delivered over
    pub method: DeliveryMethod,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires (`created_at` + 5 minutes)
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub verified: bool,

    /// Timestamp of the successful verification, if any
    pub verified_at: Option<DateTime<Utc>>,
}

impl VerificationRecord {
    /// Create a new pending record with a freshly generated code
    pub fn new(phone: String, method: DeliveryMethod) -> Self {
        Self::new_with_expiration(phone, method, CODE_TTL_MINUTES)
    }

    /// Create a new pending record with a custom validity window
    pub fn new_with_expiration(
        phone: String,
        method: DeliveryMethod,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            phone,
            code: Self::generate_code(),
            method,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            verified: false,
            verified_at: None,
        }
    }

    /// Generate a 6-digit code from the OS CSPRNG
    ///
    /// Uniform over [100000, 999999]: always exactly six digits, no
    /// leading-zero collapse. The code is a security credential, so a
    /// general-purpose PRNG is not acceptable here.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Check whether the code has expired at `now`
    ///
    /// Expiry is decided at read time; there is no background sweep.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Check whether the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Compare a submitted code against the stored one in constant time
    ///
    /// Exact string equality; codes are purely numeric so no normalization
    /// is applied.
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}
