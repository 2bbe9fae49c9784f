//! # Infrastructure Layer
//!
//! Concrete implementations of the otp_core trait seams:
//! - **store**: verification record storage (Redis, plus an in-memory
//!   implementation for development and tests)
//! - **notifier**: code delivery (Twilio SMS and voice, plus a mock)

/// Notifier module - delivery providers
pub mod notifier;

/// Store module - verification record persistence
pub mod store;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis record store error
    #[error("Record store error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Record serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Delivery provider error
    #[error("Notifier error: {0}")]
    Notifier(String),
}
