use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque id of a browser session, carried in the `dues_session` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlates a checkout redirect with the transaction it started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayment {
    pub transaction_id: Uuid,
    pub subscription_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingPayment {
    pub fn new(
        transaction_id: Uuid,
        subscription_name: impl Into<String>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            subscription_name: subscription_name.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whole seconds left before expiry, at least 1.
    pub fn ttl_secs(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let now = Utc::now();
        let pending = PendingPayment::new(Uuid::new_v4(), "Annual Dues", Duration::minutes(30), now);

        assert!(!pending.is_expired(now));
        assert!(!pending.is_expired(now + Duration::minutes(29)));
        assert!(pending.is_expired(now + Duration::minutes(30)));
    }

    #[test]
    fn ttl_secs_never_zero() {
        let now = Utc::now();
        let pending = PendingPayment::new(Uuid::new_v4(), "Annual Dues", Duration::minutes(1), now);

        assert_eq!(pending.ttl_secs(now), 60);
        assert_eq!(pending.ttl_secs(now + Duration::minutes(5)), 1);
    }
}
