//! Handler for POST /api/v1/verification/send-code

use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::services::verification::{Notifier, RecordStore};
use otp_shared::types::ApiResponse;
use otp_shared::utils::phone::mask_phone;

use crate::dto::verification::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{error_response, validation_error_response};

use super::AppState;

/// Sends a verification code to the specified phone number.
///
/// # Request Body
///
/// ```json
/// {
///     "phoneNumber": "+819012345678",
///     "method": "sms"
/// }
/// ```
///
/// `method` is optional ("sms" or "voice", default "sms").
///
/// # Responses
/// - 200: code stored and delivered; body carries `deliveryId` and `expiresAt`
/// - 400: missing phone number or unrecognized method
/// - 500: record store or delivery failure (a delivery failure leaves the
///   stored record in place; it expires unused)
pub async fn send_code<N, S>(
    state: web::Data<AppState<N, S>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    N: Notifier + 'static,
    S: RecordStore + 'static,
{
    if let Err(errors) = request.validate() {
        log::warn!("Rejected send-code request: {}", errors);
        return validation_error_response(&errors);
    }

    log::info!(
        "Processing send-code request for phone: {}",
        mask_phone(&request.phone_number)
    );

    match state
        .service
        .issue(&request.phone_number, request.method.as_deref())
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(ApiResponse::success(SendCodeResponse {
            message: format!("Verification code sent via {}", outcome.method.as_str()),
            delivery_id: outcome.delivery_id,
            expires_at: outcome.expires_at,
        })),
        Err(error) => {
            log::error!(
                "Failed to send verification code to {}: {}",
                mask_phone(&request.phone_number),
                error
            );
            error_response(&error)
        }
    }
}
