use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ErrorCode, TransactionStatus};

/// Error body returned with every failed request.
///
/// `message` is user-facing and suitable for a toast notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Hosted checkout session created for a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Page the member is redirected to in order to pay
    pub checkout_url: String,

    /// Transaction created for this payment attempt
    pub transaction_id: Uuid,
}

/// Current gateway status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatusUpdate {
    pub transaction_id: Uuid,
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_session_serde() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"checkout_url":"https://pay.example.com/c/abc","transaction_id":"{id}"}}"#
        );
        let parsed: CheckoutSession = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.checkout_url, "https://pay.example.com/c/abc");
        assert_eq!(parsed.transaction_id, id);
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            code: ErrorCode::NoPendingPayment,
            message: "No payment is awaiting confirmation.".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["code"], "NO_PENDING_PAYMENT");
        assert_eq!(value["message"], "No payment is awaiting confirmation.");
    }
}
