pub mod event;
pub mod health;
pub mod rsvp;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rsvp_core::RsvpError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// An error on its way out as `{status, {"message": ...}}`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Validation failures go back verbatim as 400. Anything else is logged
    /// with its cause and answered with `public_message` as a 500.
    pub fn from_rsvp(err: RsvpError, public_message: &str) -> Self {
        if err.is_client_error() {
            return Self::bad_request(err.to_string());
        }

        tracing::error!(error = %err, "{public_message}");
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: public_message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Malformed bodies are the caller's problem: 400, never 415/422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid RSVP payload: {}", rejection.body_text()))
    }
}
