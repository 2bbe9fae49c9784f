//! Business services

pub mod verification;

pub use verification::{
    DeliveryPayload, IssueOutcome, Notifier, RecordStore, VerificationConfig,
    VerificationService, VerifyOutcome,
};
