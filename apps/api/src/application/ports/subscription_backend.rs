use async_trait::async_trait;
use dues_types::{CheckoutSession, SubscriptionPaymentStatus, TransactionStatus};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    domain::entities::{
        payment_transaction::PaymentTransaction, subscription_plan::SubscriptionPlan,
        user_subscription::UserSubscription,
    },
};

/// Filter for listing user subscriptions. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SubscriptionFilter {
    pub member_id: Option<Uuid>,
    pub status: Option<SubscriptionPaymentStatus>,
}

impl SubscriptionFilter {
    pub fn matches(&self, subscription: &UserSubscription) -> bool {
        self.member_id.is_none_or(|id| id == subscription.member_id)
            && self.status.is_none_or(|status| status == subscription.status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitiatePaymentRequest {
    pub user_subscription_id: Uuid,
    pub amount: Decimal,
    /// Where the gateway sends the member after checkout
    pub return_url: String,
}

/// The organisation backend that owns plans, subscriptions and transactions.
///
/// Every amount, status and permission comes from here; callers never
/// recompute them. Single-item lookups return `AppError::NotFound` when the
/// backend does not know the id.
#[async_trait]
pub trait SubscriptionBackend: Send + Sync {
    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>>;

    async fn get_plan(&self, plan_id: Uuid) -> AppResult<SubscriptionPlan>;

    async fn list_user_subscriptions(
        &self,
        filter: &SubscriptionFilter,
    ) -> AppResult<Vec<UserSubscription>>;

    async fn get_user_subscription(&self, subscription_id: Uuid) -> AppResult<UserSubscription>;

    /// Creates a hosted checkout session. The backend creates the transaction.
    async fn initiate_payment(&self, request: &InitiatePaymentRequest)
    -> AppResult<CheckoutSession>;

    async fn list_transactions(
        &self,
        subscription_id: Uuid,
    ) -> AppResult<Vec<PaymentTransaction>>;

    /// Asks the backend (and through it the gateway) for the current status.
    async fn check_transaction_status(&self, transaction_id: Uuid) -> AppResult<TransactionStatus>;
}
