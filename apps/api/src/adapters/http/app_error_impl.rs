use crate::app_error::{AppError, ErrorCode};
use crate::application::error_messages::user_message;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dues_types::ErrorBody;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        // Client mistakes are expected traffic; only failures are errors.
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        error_resp(status, self.code(), user_message(&self))
    }
}

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound => StatusCode::NOT_FOUND,
        AppError::PaymentNotAllowed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::AlreadyPaid => StatusCode::CONFLICT,
        AppError::CheckInProgress => StatusCode::CONFLICT,
        AppError::NoPendingPayment => StatusCode::NOT_FOUND,
        AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        AppError::Forbidden => StatusCode::FORBIDDEN,
        AppError::Upstream { status, .. } if *status < 500 => StatusCode::BAD_REQUEST,
        AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AppError::UpstreamContract(_) => StatusCode::BAD_GATEWAY,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: String) -> Response {
    (status, Json(ErrorBody { code, message })).into_response()
}
