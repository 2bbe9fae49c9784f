//! # OTP Relay Core
//!
//! Core domain layer for the OTP Relay backend: the verification record
//! entity, the issue/verify lifecycle state machine, and the trait seams
//! (`Notifier`, `RecordStore`) that infrastructure implements.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
