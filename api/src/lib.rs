//! HTTP API layer for OTP Relay
//!
//! Request DTOs, route handlers, error-to-status mapping, and CORS
//! configuration. The handlers are generic over the core trait seams so
//! tests can run against in-memory implementations.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
