//! Domain entities

pub mod verification_record;

pub use verification_record::{DeliveryMethod, VerificationRecord, CODE_LENGTH, CODE_TTL_MINUTES};
