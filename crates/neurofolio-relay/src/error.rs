use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::contact::FieldErrors;

/// Failure to hand a message to the email service.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("email service is not configured")]
    NotConfigured,
    #[error("email service responded with status {status}")]
    Rejected { status: u16, body: String },
    #[error("email request failed: {0}")]
    Transport(#[from] ureq::Error),
}

/// Failure of a contact submission, as reported to the HTTP caller.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid contact form")]
    Invalid(FieldErrors),
    #[error("request origin does not match this site")]
    Forbidden,
    #[error("email service is not configured")]
    NotConfigured,
    #[error("email delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
    #[error("malformed request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("delivery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RelayError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "errors": errors }),
            ),
            RelayError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "success": false, "message": "Forbidden" }),
            ),
            RelayError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "message": "Email service is not configured" }),
            ),
            RelayError::Delivery(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "message": "Failed to send email. Please try again later.",
                }),
            ),
            RelayError::Body(_) | RelayError::Task(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "message": "An error occurred while processing your request",
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
