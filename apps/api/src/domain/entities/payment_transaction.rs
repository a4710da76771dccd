use chrono::{DateTime, Utc};
use dues_types::TransactionStatus;
use rust_decimal::Decimal;
use uuid::Uuid;

/// One payment attempt against a user subscription. Status transitions are
/// driven by the gateway; this service only observes them.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTransaction {
    pub id: Uuid,
    pub user_subscription_id: Uuid,
    pub client_reference: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_channel: Option<String>,
    pub payment_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
