//! Shared utilities and common types for the OTP Relay server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response wrappers
//! - Utility functions (phone number masking, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, ServerConfig};
pub use types::ApiResponse;
pub use utils::phone;
