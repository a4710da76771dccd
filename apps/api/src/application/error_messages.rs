//! Turns an `AppError` into the text shown in the dashboard toast.
//!
//! Validation and permission messages are already written for members and
//! pass through unchanged. Infrastructure failures get a generic sentence so
//! backend details never reach the browser.

use crate::app_error::AppError;

pub const ALREADY_PAID_MESSAGE: &str = "This subscription is already fully paid";
pub const PAYMENT_NOT_ALLOWED_FALLBACK: &str = "Payment is not allowed for this subscription";

pub fn user_message(error: &AppError) -> String {
    match error {
        AppError::InvalidInput(msg) => msg.clone(),
        AppError::NotFound => "The requested record could not be found.".to_string(),
        AppError::PaymentNotAllowed(reason) => reason.clone(),
        AppError::AlreadyPaid => ALREADY_PAID_MESSAGE.to_string(),
        AppError::CheckInProgress => {
            "A status check for this transaction is already in progress.".to_string()
        }
        AppError::NoPendingPayment => "No payment is awaiting confirmation.".to_string(),
        AppError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
        AppError::Forbidden => "You do not have permission to perform this action.".to_string(),
        AppError::Upstream { status, message } if *status < 500 && !message.trim().is_empty() => {
            message.clone()
        }
        AppError::Upstream { .. } => {
            "The server could not complete the request. Please try again.".to_string()
        }
        AppError::UpstreamUnavailable(_) => {
            "Unable to reach the server. Please check your connection and try again.".to_string()
        }
        AppError::UpstreamContract(_) => "The server returned an unexpected response.".to_string(),
        AppError::Internal(_) => "Something went wrong. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_pass_through() {
        let err = AppError::InvalidInput(
            "Amount cannot exceed outstanding balance of GH₵ 75.00".to_string(),
        );
        assert_eq!(
            user_message(&err),
            "Amount cannot exceed outstanding balance of GH₵ 75.00"
        );
    }

    #[test]
    fn backend_client_errors_surface_their_detail() {
        let err = AppError::Upstream {
            status: 400,
            message: "Plan is closed".to_string(),
        };
        assert_eq!(user_message(&err), "Plan is closed");
    }

    #[test]
    fn backend_server_errors_are_generic() {
        let err = AppError::Upstream {
            status: 500,
            message: "Traceback (most recent call last)".to_string(),
        };
        assert!(!user_message(&err).contains("Traceback"));
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = AppError::Internal("redis: connection refused".to_string());
        assert_eq!(user_message(&err), "Something went wrong. Please try again.");
    }
}
