//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` wires the real use cases around a seeded
//! `DummyBackend` and an in-memory pending payment store.

use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    application::ports::subscription_backend::SubscriptionBackend,
    domain::entities::{
        payment_transaction::PaymentTransaction, subscription_plan::SubscriptionPlan,
        user_subscription::UserSubscription,
    },
    infra::{
        dummy_backend::DummyBackend, pending_payments::InMemoryPendingPaymentStore,
        setup::build_app_state,
    },
    test_utils::{UnreachableBackend, test_config},
};

pub struct TestAppStateBuilder {
    backend: DummyBackend,
    unreachable: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            backend: DummyBackend::new(),
            unreachable: false,
        }
    }

    pub fn with_plan(mut self, plan: SubscriptionPlan) -> Self {
        self.backend = self.backend.with_plan(plan);
        self
    }

    pub fn with_subscription(mut self, subscription: UserSubscription) -> Self {
        self.backend = self.backend.with_subscription(subscription);
        self
    }

    pub fn with_transaction(mut self, transaction: PaymentTransaction) -> Self {
        self.backend = self.backend.with_transaction(transaction);
        self
    }

    /// Every backend call fails as if the network were down.
    pub fn with_unreachable_backend(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Build the AppState and return the backend and pending store for
    /// assertions.
    pub fn build_with_mocks(
        self,
    ) -> (
        AppState,
        Arc<DummyBackend>,
        Arc<InMemoryPendingPaymentStore>,
    ) {
        let backend = Arc::new(self.backend);
        let store = Arc::new(InMemoryPendingPaymentStore::new());

        let served: Arc<dyn SubscriptionBackend> = if self.unreachable {
            Arc::new(UnreachableBackend)
        } else {
            backend.clone()
        };

        let app_state = build_app_state(test_config(), served, store.clone());
        (app_state, backend, store)
    }

    pub fn build(self) -> AppState {
        self.build_with_mocks().0
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
