use std::sync::Arc;

use chrono::{Duration, Utc};
use dues_types::{CheckoutSession, TransactionStatus};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        error_messages::PAYMENT_NOT_ALLOWED_FALLBACK,
        ports::{
            pending_payment_store::PendingPaymentStore,
            subscription_backend::{InitiatePaymentRequest, SubscriptionBackend},
        },
        validators::validate_payment_amount,
    },
    domain::entities::{
        pending_payment::{PendingPayment, SessionKey},
        user_subscription::UserSubscription,
    },
    use_cases::transactions::TransactionUseCases,
};

/// What the member sees after coming back from the hosted checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub transaction_id: Uuid,
    pub subscription_name: String,
    pub status: TransactionStatus,
}

#[derive(Clone)]
pub struct PaymentUseCases {
    backend: Arc<dyn SubscriptionBackend>,
    pending_store: Arc<dyn PendingPaymentStore>,
    transactions: Arc<TransactionUseCases>,
    return_url: String,
    pending_ttl: Duration,
}

impl PaymentUseCases {
    pub fn new(
        backend: Arc<dyn SubscriptionBackend>,
        pending_store: Arc<dyn PendingPaymentStore>,
        transactions: Arc<TransactionUseCases>,
        return_url: String,
        pending_ttl: Duration,
    ) -> Self {
        Self {
            backend,
            pending_store,
            transactions,
            return_url,
            pending_ttl,
        }
    }

    /// Validates the amount and starts a hosted checkout.
    ///
    /// Nothing is sent to the backend's initiation endpoint unless every
    /// check passes.
    #[instrument(skip(self, session))]
    pub async fn initiate(
        &self,
        session: &SessionKey,
        subscription_id: Uuid,
        amount: Decimal,
    ) -> AppResult<CheckoutSession> {
        let subscription = self.backend.get_user_subscription(subscription_id).await?;

        ensure_payable(&subscription)?;
        validate_payment_amount(amount, subscription.outstanding())?;

        let checkout = self
            .backend
            .initiate_payment(&InitiatePaymentRequest {
                user_subscription_id: subscription.id,
                amount,
                return_url: self.return_url.clone(),
            })
            .await?;

        let pending = PendingPayment::new(
            checkout.transaction_id,
            subscription.plan_name.clone(),
            self.pending_ttl,
            Utc::now(),
        );
        // The backend already holds the transaction; the member still gets
        // the checkout URL, only the return page loses its correlation.
        if let Err(e) = self.pending_store.put(session, &pending).await {
            warn!(
                transaction_id = %checkout.transaction_id,
                error = %e,
                "Failed to store pending payment"
            );
        }

        info!(
            subscription_id = %subscription.id,
            transaction_id = %checkout.transaction_id,
            amount = %amount,
            "Payment initiated"
        );

        Ok(checkout)
    }

    /// Consumes the session's pending payment and checks its status once.
    ///
    /// If the status check fails the pending payment is put back so the
    /// member can retry from the same page.
    #[instrument(skip(self, session))]
    pub async fn complete_checkout(&self, session: &SessionKey) -> AppResult<CheckoutOutcome> {
        let pending = self
            .pending_store
            .take(session)
            .await?
            .ok_or(AppError::NoPendingPayment)?;

        if pending.is_expired(Utc::now()) {
            warn!(
                transaction_id = %pending.transaction_id,
                expired_at = %pending.expires_at,
                "Pending payment expired before checkout return"
            );
            return Err(AppError::NoPendingPayment);
        }

        let status = match self.transactions.check_status(pending.transaction_id).await {
            Ok(status) => status,
            Err(e) => {
                if let Err(restore_err) = self.pending_store.put(session, &pending).await {
                    warn!(
                        transaction_id = %pending.transaction_id,
                        error = %restore_err,
                        "Failed to restore pending payment"
                    );
                }
                return Err(e);
            }
        };

        Ok(CheckoutOutcome {
            transaction_id: pending.transaction_id,
            subscription_name: pending.subscription_name,
            status,
        })
    }
}

/// Rejects subscriptions the member cannot pay towards right now.
pub fn ensure_payable(subscription: &UserSubscription) -> AppResult<()> {
    if !subscription.can_make_payment.allowed {
        let reason = subscription
            .can_make_payment
            .reason
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| PAYMENT_NOT_ALLOWED_FALLBACK.to_string());
        return Err(AppError::PaymentNotAllowed(reason));
    }

    if !subscription.has_balance() {
        return Err(AppError::AlreadyPaid);
    }

    Ok(())
}
