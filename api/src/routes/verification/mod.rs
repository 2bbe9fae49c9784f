//! Verification routes
//!
//! Two operations share one service: issue a code, verify a code.
//! Handlers are generic over the notifier and record store seams so the
//! same routing works against Twilio/Redis in production and
//! mock/in-memory implementations in tests.

mod send_code;
mod verify_code;

use std::sync::Arc;

use actix_web::{web, Scope};

use otp_core::services::verification::{Notifier, RecordStore, VerificationService};

pub use send_code::send_code;
pub use verify_code::verify_code;

/// Application state holding the shared verification service
///
/// Owned by the server process, initialized once, shared read-only across
/// concurrent request handlers.
pub struct AppState<N: Notifier, S: RecordStore> {
    pub service: Arc<VerificationService<N, S>>,
}

/// Build the `/api/v1/verification` scope
pub fn scope<N, S>() -> Scope
where
    N: Notifier + 'static,
    S: RecordStore + 'static,
{
    web::scope("/api/v1/verification")
        .route("/send-code", web::post().to(send_code::<N, S>))
        .route("/verify-code", web::post().to(verify_code::<N, S>))
}
