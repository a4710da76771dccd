use async_trait::async_trait;

use crate::{
    app_error::AppResult,
    domain::entities::pending_payment::{PendingPayment, SessionKey},
};

/// Per-session storage for the payment awaiting its checkout return.
#[async_trait]
pub trait PendingPaymentStore: Send + Sync {
    /// Stores the pending payment, replacing any previous one for the session.
    async fn put(&self, session: &SessionKey, pending: &PendingPayment) -> AppResult<()>;

    /// Removes and returns the pending payment. Single-use: a second call
    /// for the same session returns `None`.
    async fn take(&self, session: &SessionKey) -> AppResult<Option<PendingPayment>>;
}
