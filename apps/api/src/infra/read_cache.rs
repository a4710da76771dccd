//! Short-lived cache in front of the backend's read endpoints.
//!
//! Writes that go through the cache invalidate whatever they may have
//! changed. Transaction lists and status checks are never cached.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use dues_types::{CheckoutSession, TransactionStatus};
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    application::ports::subscription_backend::{
        InitiatePaymentRequest, SubscriptionBackend, SubscriptionFilter,
    },
    domain::entities::{
        payment_transaction::PaymentTransaction, subscription_plan::SubscriptionPlan,
        user_subscription::UserSubscription,
    },
};

/// Upper bound on entries per map. Filters come from query strings, so the
/// key space is caller-controlled.
const MAX_ENTRIES: usize = 512;

struct TtlMap<K, V> {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlMap<K, V> {
    fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_ENTRIES)
    }

    fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        let entries = self.lock();
        entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    fn insert(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.lock();
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, (stored_at, _))| *stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(key, (Instant::now(), value));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }

    fn remove(&self, key: &K) {
        self.lock().remove(key);
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, (Instant, V)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Caching decorator over any `SubscriptionBackend`.
pub struct CachedBackend {
    inner: Arc<dyn SubscriptionBackend>,
    plans: TtlMap<(), Vec<SubscriptionPlan>>,
    plan: TtlMap<Uuid, SubscriptionPlan>,
    subscriptions: TtlMap<SubscriptionFilter, Vec<UserSubscription>>,
    subscription: TtlMap<Uuid, UserSubscription>,
}

impl CachedBackend {
    pub fn new(inner: Arc<dyn SubscriptionBackend>, ttl: Duration) -> Self {
        Self {
            inner,
            plans: TtlMap::new(ttl),
            plan: TtlMap::new(ttl),
            subscriptions: TtlMap::new(ttl),
            subscription: TtlMap::new(ttl),
        }
    }

    /// Drops cached reads that may include the given subscription.
    pub fn invalidate_subscription(&self, subscription_id: Uuid) {
        self.subscription.remove(&subscription_id);
        self.subscriptions.clear();
    }
}

#[async_trait]
impl SubscriptionBackend for CachedBackend {
    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        if let Some(plans) = self.plans.get(&()) {
            return Ok(plans);
        }
        let plans = self.inner.list_plans().await?;
        self.plans.insert((), plans.clone());
        Ok(plans)
    }

    async fn get_plan(&self, plan_id: Uuid) -> AppResult<SubscriptionPlan> {
        if let Some(plan) = self.plan.get(&plan_id) {
            return Ok(plan);
        }
        let plan = self.inner.get_plan(plan_id).await?;
        self.plan.insert(plan_id, plan.clone());
        Ok(plan)
    }

    async fn list_user_subscriptions(
        &self,
        filter: &SubscriptionFilter,
    ) -> AppResult<Vec<UserSubscription>> {
        if let Some(subs) = self.subscriptions.get(filter) {
            return Ok(subs);
        }
        let subs = self.inner.list_user_subscriptions(filter).await?;
        self.subscriptions.insert(filter.clone(), subs.clone());
        Ok(subs)
    }

    async fn get_user_subscription(&self, subscription_id: Uuid) -> AppResult<UserSubscription> {
        if let Some(sub) = self.subscription.get(&subscription_id) {
            return Ok(sub);
        }
        let sub = self.inner.get_user_subscription(subscription_id).await?;
        self.subscription.insert(subscription_id, sub.clone());
        Ok(sub)
    }

    async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> AppResult<CheckoutSession> {
        let result = self.inner.initiate_payment(request).await;
        self.invalidate_subscription(request.user_subscription_id);
        result
    }

    async fn list_transactions(
        &self,
        subscription_id: Uuid,
    ) -> AppResult<Vec<PaymentTransaction>> {
        self.inner.list_transactions(subscription_id).await
    }

    async fn check_transaction_status(&self, transaction_id: Uuid) -> AppResult<TransactionStatus> {
        let result = self.inner.check_transaction_status(transaction_id).await;
        // A settled transaction changes amounts on a subscription we can't
        // identify from the transaction id alone.
        if result.is_ok() {
            self.subscriptions.clear();
            self.subscription.clear();
        }
        result
    }
}
