use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::pending_payment_store::PendingPaymentStore,
    domain::entities::pending_payment::{PendingPayment, SessionKey},
};

/// Redis-backed store. Entries expire with the pending payment's TTL.
#[derive(Clone)]
pub struct RedisPendingPaymentStore {
    manager: ConnectionManager,
}

impl RedisPendingPaymentStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    fn key(session: &SessionKey) -> String {
        format!("pending_payment:{session}")
    }
}

#[async_trait]
impl PendingPaymentStore for RedisPendingPaymentStore {
    async fn put(&self, session: &SessionKey, pending: &PendingPayment) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let ttl_secs = pending.ttl_secs(Utc::now());

        let json = serde_json::to_string(pending)
            .map_err(|e| AppError::Internal(format!("Failed to serialize pending payment: {e}")))?;

        let _: () = conn
            .set_ex(Self::key(session), json, ttl_secs)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store pending payment: {e}")))?;

        Ok(())
    }

    async fn take(&self, session: &SessionKey) -> AppResult<Option<PendingPayment>> {
        let mut conn = self.manager.clone();

        // GET + DEL in one step so two returns can't both claim the payment
        let script = redis::Script::new(
            r#"
            local value = redis.call('GET', KEYS[1])
            if value then
                redis.call('DEL', KEYS[1])
            end
            return value
            "#,
        );

        let raw: Option<String> = script
            .key(Self::key(session))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to consume pending payment: {e}")))?;

        raw.map(|value| {
            serde_json::from_str(&value)
                .map_err(|e| AppError::Internal(format!("Failed to parse pending payment: {e}")))
        })
        .transpose()
    }
}

/// Process-local store for single-instance deployments and tests.
#[derive(Default)]
pub struct InMemoryPendingPaymentStore {
    entries: Mutex<HashMap<SessionKey, PendingPayment>>,
}

impl InMemoryPendingPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads without consuming.
    pub fn peek(&self, session: &SessionKey) -> Option<PendingPayment> {
        self.lock().get(session).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionKey, PendingPayment>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PendingPaymentStore for InMemoryPendingPaymentStore {
    async fn put(&self, session: &SessionKey, pending: &PendingPayment) -> AppResult<()> {
        let now = Utc::now();
        let mut entries = self.lock();
        entries.retain(|_, p| !p.is_expired(now));
        entries.insert(session.clone(), pending.clone());
        Ok(())
    }

    async fn take(&self, session: &SessionKey) -> AppResult<Option<PendingPayment>> {
        Ok(self.lock().remove(session))
    }
}
