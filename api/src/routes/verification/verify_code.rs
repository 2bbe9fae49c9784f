//! Handler for POST /api/v1/verification/verify-code

use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::services::verification::{Notifier, RecordStore};
use otp_shared::types::ApiResponse;
use otp_shared::utils::phone::mask_phone;

use crate::dto::verification::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{error_response, validation_error_response};

use super::AppState;

/// Verifies a submitted code for a phone number.
///
/// # Request Body
///
/// ```json
/// {
///     "phoneNumber": "+819012345678",
///     "code": "123456"
/// }
/// ```
///
/// # Responses
/// - 200: verification succeeded; the code is consumed and cannot be reused
/// - 400: missing field, wrong code, expired code, or already-used code
/// - 404: no code was ever issued for this phone number
/// - 500: record store failure
pub async fn verify_code<N, S>(
    state: web::Data<AppState<N, S>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    N: Notifier + 'static,
    S: RecordStore + 'static,
{
    if let Err(errors) = request.validate() {
        log::warn!("Rejected verify-code request: {}", errors);
        return validation_error_response(&errors);
    }

    match state
        .service
        .verify(&request.phone_number, &request.code)
        .await
    {
        Ok(outcome) => {
            log::info!("Verification successful for {}", mask_phone(&outcome.phone));
            HttpResponse::Ok().json(ApiResponse::success(VerifyCodeResponse {
                message: "Verification successful".to_string(),
                phone_number: outcome.phone,
            }))
        }
        Err(error) => {
            log::warn!(
                "Verification failed for {}: {}",
                mask_phone(&request.phone_number),
                error
            );
            error_response(&error)
        }
    }
}
