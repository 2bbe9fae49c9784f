//! Configuration module
//!
//! Environment-driven configuration for the pieces of infrastructure the
//! service talks to. Provider credentials (Twilio) live in the infra crate
//! next to the client that consumes them.

pub mod cache;
pub mod server;

pub use cache::CacheConfig;
pub use server::ServerConfig;
