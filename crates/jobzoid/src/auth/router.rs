use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::mail::MailSender;
use super::otp::{IssueError, OtpService, OtpStore, VerifyError};

#[derive(Debug, Deserialize)]
pub(crate) struct OtpRequest {
    pub(crate) email: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OtpVerify {
    pub(crate) email: String,
    pub(crate) code: String,
}

/// Router builder exposing the OTP request/verify endpoints.
pub fn auth_router<S, M>(service: Arc<OtpService<S, M>>) -> Router
where
    S: OtpStore + 'static,
    M: MailSender + 'static,
{
    Router::new()
        .route("/api/v1/auth/otp/request", post(request_handler::<S, M>))
        .route("/api/v1/auth/otp/verify", post(verify_handler::<S, M>))
        .with_state(service)
}

pub(crate) async fn request_handler<S, M>(
    State(service): State<Arc<OtpService<S, M>>>,
    axum::Json(request): axum::Json<OtpRequest>,
) -> Response
where
    S: OtpStore + 'static,
    M: MailSender + 'static,
{
    match service.issue(&request.email) {
        Ok(_) => {
            let payload = json!({
                "status": "success",
                "message": "verification code sent",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(IssueError::Delivery(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn verify_handler<S, M>(
    State(service): State<Arc<OtpService<S, M>>>,
    axum::Json(request): axum::Json<OtpVerify>,
) -> Response
where
    S: OtpStore + 'static,
    M: MailSender + 'static,
{
    match service.verify(&request.email, &request.code) {
        Ok(verified) => (StatusCode::OK, axum::Json(verified)).into_response(),
        Err(
            error @ (VerifyError::Malformed
            | VerifyError::NotFound
            | VerifyError::Expired
            | VerifyError::Mismatch),
        ) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
