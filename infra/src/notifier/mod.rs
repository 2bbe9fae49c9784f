//! Delivery provider implementations

pub mod mock;
pub mod twilio;

pub use mock::MockNotifier;
pub use twilio::{TwilioConfig, TwilioNotifier};
