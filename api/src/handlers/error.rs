//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use otp_core::errors::VerificationError;
use otp_shared::types::ApiResponse;

/// HTTP status for a domain error
///
/// The three verify-rejection kinds are client errors (the caller can act
/// on them); a missing record is 404; infrastructure and delivery failures
/// are server errors.
fn status_for(error: &VerificationError) -> StatusCode {
    match error {
        VerificationError::InvalidArgument { .. }
        | VerificationError::AlreadyUsed
        | VerificationError::Expired
        | VerificationError::CodeMismatch => StatusCode::BAD_REQUEST,
        VerificationError::NotFound => StatusCode::NOT_FOUND,
        VerificationError::DeliveryFailed(_) | VerificationError::StoreUnavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Build the error envelope for a domain error
pub fn error_response(error: &VerificationError) -> HttpResponse {
    HttpResponse::build(status_for(error)).json(ApiResponse::<()>::error(error.to_string()))
}

/// Build a 400 envelope from request-boundary validation failures
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut reasons: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    reasons.sort();

    HttpResponse::BadRequest().json(ApiResponse::<()>::error(reasons.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&VerificationError::missing("phoneNumber")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&VerificationError::AlreadyUsed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&VerificationError::Expired), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&VerificationError::CodeMismatch), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&VerificationError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&VerificationError::DeliveryFailed("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&VerificationError::StoreUnavailable("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body() {
        let response = error_response(&VerificationError::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
