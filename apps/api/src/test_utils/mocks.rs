//! Mocks for failure paths.

use async_trait::async_trait;
use dues_types::{CheckoutSession, TransactionStatus};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::{
        pending_payment_store::PendingPaymentStore,
        subscription_backend::{InitiatePaymentRequest, SubscriptionBackend, SubscriptionFilter},
    },
    domain::entities::{
        payment_transaction::PaymentTransaction,
        pending_payment::{PendingPayment, SessionKey},
        subscription_plan::SubscriptionPlan,
        user_subscription::UserSubscription,
    },
};

/// Backend that behaves like a dropped network connection.
#[derive(Default)]
pub struct UnreachableBackend;

impl UnreachableBackend {
    fn fail<T>() -> AppResult<T> {
        Err(AppError::UpstreamUnavailable(
            "connection refused".to_string(),
        ))
    }
}

#[async_trait]
impl SubscriptionBackend for UnreachableBackend {
    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        Self::fail()
    }

    async fn get_plan(&self, _plan_id: Uuid) -> AppResult<SubscriptionPlan> {
        Self::fail()
    }

    async fn list_user_subscriptions(
        &self,
        _filter: &SubscriptionFilter,
    ) -> AppResult<Vec<UserSubscription>> {
        Self::fail()
    }

    async fn get_user_subscription(&self, _subscription_id: Uuid) -> AppResult<UserSubscription> {
        Self::fail()
    }

    async fn initiate_payment(
        &self,
        _request: &InitiatePaymentRequest,
    ) -> AppResult<CheckoutSession> {
        Self::fail()
    }

    async fn list_transactions(
        &self,
        _subscription_id: Uuid,
    ) -> AppResult<Vec<PaymentTransaction>> {
        Self::fail()
    }

    async fn check_transaction_status(
        &self,
        _transaction_id: Uuid,
    ) -> AppResult<TransactionStatus> {
        Self::fail()
    }
}

/// Pending payment store whose backing service is down.
#[derive(Default)]
pub struct FailingPendingPaymentStore;

#[async_trait]
impl PendingPaymentStore for FailingPendingPaymentStore {
    async fn put(&self, _session: &SessionKey, _pending: &PendingPayment) -> AppResult<()> {
        Err(AppError::Internal("store unavailable".to_string()))
    }

    async fn take(&self, _session: &SessionKey) -> AppResult<Option<PendingPayment>> {
        Err(AppError::Internal("store unavailable".to_string()))
    }
}
