//! Verification service module - the OTP issue/verify workflow
//!
//! This module provides the complete verification lifecycle:
//! - code generation and delivery-payload formatting
//! - record persistence with overwrite-on-reissue semantics
//! - single-use verification with strict check ordering
//! - trait seams for the delivery channel and the record store

mod config;
mod payload;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use payload::DeliveryPayload;
pub use service::VerificationService;
pub use traits::{Notifier, RecordStore};
pub use types::{IssueOutcome, VerifyOutcome};
