//! Type definitions shared across server modules

pub mod response;

pub use response::{ApiResponse, HealthResponse};
