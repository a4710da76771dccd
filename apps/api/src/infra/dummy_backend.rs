use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, Utc};
use dues_types::{AssignmentTarget, CheckoutSession, SubscriptionPaymentStatus, TransactionStatus};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::subscription_backend::{
        InitiatePaymentRequest, SubscriptionBackend, SubscriptionFilter,
    },
    domain::entities::{
        money::round_money,
        payment_transaction::PaymentTransaction,
        subscription_plan::SubscriptionPlan,
        user_subscription::{PaymentPermission, UserSubscription},
    },
};

#[derive(Default)]
struct DummyState {
    plans: Vec<SubscriptionPlan>,
    subscriptions: Vec<UserSubscription>,
    transactions: Vec<PaymentTransaction>,
    initiate_requests: Vec<InitiatePaymentRequest>,
    status_calls: usize,
    read_calls: usize,
}

/// In-process stand-in for the organisation backend.
///
/// Used for local development (`BACKEND_MODE=dummy`) and tests. Checkout
/// sessions redirect straight back to the return URL. With auto-settle on,
/// the first status check of an open transaction marks it successful and
/// credits the subscription, the way the real backend would after the
/// gateway callback.
pub struct DummyBackend {
    state: Mutex<DummyState>,
    status_delay: Duration,
    auto_settle: bool,
}

impl Default for DummyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DummyState::default()),
            status_delay: Duration::ZERO,
            auto_settle: false,
        }
    }

    /// A backend seeded with one member's plans, subscriptions and history.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let member_id = Uuid::new_v4();
        let year = today.year();
        let date = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today);

        let annual = SubscriptionPlan {
            id: Uuid::new_v4(),
            name: format!("{year} Annual Dues"),
            description: Some("Yearly membership dues".to_string()),
            amount: Decimal::new(15000, 2),
            start_date: date(year, 1, 1),
            end_date: date(year, 12, 31),
            target: AssignmentTarget::Both,
            member_count: 1,
        };
        let harvest = SubscriptionPlan {
            id: Uuid::new_v4(),
            name: "Harvest Levy".to_string(),
            description: None,
            amount: Decimal::new(5000, 2),
            start_date: today + ChronoDuration::days(30),
            end_date: today + ChronoDuration::days(60),
            target: AssignmentTarget::Members,
            member_count: 1,
        };
        let anniversary = SubscriptionPlan {
            id: Uuid::new_v4(),
            name: format!("{} Anniversary Fund", year - 1),
            description: None,
            amount: Decimal::new(10000, 2),
            start_date: date(year - 1, 3, 1),
            end_date: date(year - 1, 6, 30),
            target: AssignmentTarget::Executive,
            member_count: 1,
        };

        let subscription = |plan: &SubscriptionPlan,
                            paid: Decimal,
                            status: SubscriptionPaymentStatus,
                            permission: PaymentPermission| {
            let outstanding = (plan.amount - paid).max(Decimal::ZERO);
            UserSubscription {
                id: Uuid::new_v4(),
                plan_id: plan.id,
                plan_name: plan.name.clone(),
                member_id,
                member_name: Some("Sample Member".to_string()),
                subscription_amount: plan.amount,
                amount_paid: paid,
                outstanding_amount: outstanding,
                status,
                payment_progress_percentage: progress(paid, plan.amount),
                start_date: plan.start_date,
                end_date: plan.end_date,
                can_make_payment: permission,
                payment_reference: None,
                payment_date: None,
            }
        };

        let annual_sub = subscription(
            &annual,
            Decimal::new(7500, 2),
            SubscriptionPaymentStatus::PartiallyPaid,
            PaymentPermission::allowed(),
        );
        let harvest_sub = subscription(
            &harvest,
            Decimal::ZERO,
            SubscriptionPaymentStatus::NotPaid,
            PaymentPermission::denied("This plan has not started yet"),
        );
        let anniversary_sub = subscription(
            &anniversary,
            anniversary.amount,
            SubscriptionPaymentStatus::FullyPaid,
            PaymentPermission::denied("This plan has ended"),
        );

        let now = Utc::now();
        let transactions = vec![
            PaymentTransaction {
                id: Uuid::new_v4(),
                user_subscription_id: annual_sub.id,
                client_reference: client_reference(),
                amount: Decimal::new(7500, 2),
                currency: "GHS".to_string(),
                status: TransactionStatus::Success,
                payment_channel: Some("mobile_money".to_string()),
                payment_type: Some("mtn-gh".to_string()),
                created_at: now - ChronoDuration::days(20),
            },
            PaymentTransaction {
                id: Uuid::new_v4(),
                user_subscription_id: annual_sub.id,
                client_reference: client_reference(),
                amount: Decimal::new(2000, 2),
                currency: "GHS".to_string(),
                status: TransactionStatus::Failed,
                payment_channel: Some("card".to_string()),
                payment_type: None,
                created_at: now - ChronoDuration::days(5),
            },
        ];

        tracing::info!(member_id = %member_id, "Dummy backend seeded with sample data");

        Self {
            state: Mutex::new(DummyState {
                plans: vec![annual, harvest, anniversary],
                subscriptions: vec![annual_sub, harvest_sub, anniversary_sub],
                transactions,
                ..DummyState::default()
            }),
            status_delay: Duration::ZERO,
            auto_settle: true,
        }
    }

    pub fn with_plan(self, plan: SubscriptionPlan) -> Self {
        self.lock().plans.push(plan);
        self
    }

    pub fn with_subscription(self, subscription: UserSubscription) -> Self {
        self.lock().subscriptions.push(subscription);
        self
    }

    pub fn with_transaction(self, transaction: PaymentTransaction) -> Self {
        self.lock().transactions.push(transaction);
        self
    }

    /// Delays every status check, to hold a check in flight.
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    pub fn with_auto_settle(mut self, auto_settle: bool) -> Self {
        self.auto_settle = auto_settle;
        self
    }

    /// Simulates a gateway callback changing a transaction's status.
    pub fn set_transaction_status(&self, transaction_id: Uuid, status: TransactionStatus) {
        let mut state = self.lock();
        transition(&mut state, transaction_id, status);
    }

    pub fn transaction(&self, transaction_id: Uuid) -> Option<PaymentTransaction> {
        self.lock()
            .transactions
            .iter()
            .find(|tx| tx.id == transaction_id)
            .cloned()
    }

    pub fn initiate_calls(&self) -> usize {
        self.lock().initiate_requests.len()
    }

    pub fn last_initiate_request(&self) -> Option<InitiatePaymentRequest> {
        self.lock().initiate_requests.last().cloned()
    }

    pub fn status_calls(&self) -> usize {
        self.lock().status_calls
    }

    /// Number of plan and subscription reads served.
    pub fn read_calls(&self) -> usize {
        self.lock().read_calls
    }

    fn lock(&self) -> MutexGuard<'_, DummyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn client_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("DUES-{}", id[..8].to_uppercase())
}

fn progress(paid: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_money(paid / total * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
}

/// Applies a status change, crediting the subscription on first success.
fn transition(state: &mut DummyState, transaction_id: Uuid, status: TransactionStatus) {
    let Some(tx) = state
        .transactions
        .iter_mut()
        .find(|tx| tx.id == transaction_id)
    else {
        return;
    };

    let newly_successful = status.is_successful() && !tx.status.is_successful();
    tx.status = status;
    if !newly_successful {
        return;
    }

    let (subscription_id, amount, reference) =
        (tx.user_subscription_id, tx.amount, tx.client_reference.clone());

    if let Some(sub) = state
        .subscriptions
        .iter_mut()
        .find(|s| s.id == subscription_id)
    {
        sub.amount_paid += amount;
        sub.outstanding_amount = (sub.subscription_amount - sub.amount_paid).max(Decimal::ZERO);
        sub.payment_progress_percentage = progress(sub.amount_paid, sub.subscription_amount);
        sub.status = if sub.outstanding_amount.is_zero() {
            SubscriptionPaymentStatus::FullyPaid
        } else {
            SubscriptionPaymentStatus::PartiallyPaid
        };
        sub.payment_reference = Some(reference);
        sub.payment_date = Some(Utc::now());
    }
}

#[async_trait]
impl SubscriptionBackend for DummyBackend {
    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let mut state = self.lock();
        state.read_calls += 1;
        Ok(state.plans.clone())
    }

    async fn get_plan(&self, plan_id: Uuid) -> AppResult<SubscriptionPlan> {
        let mut state = self.lock();
        state.read_calls += 1;
        state
            .plans
            .iter()
            .find(|p| p.id == plan_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn list_user_subscriptions(
        &self,
        filter: &SubscriptionFilter,
    ) -> AppResult<Vec<UserSubscription>> {
        let mut state = self.lock();
        state.read_calls += 1;
        Ok(state
            .subscriptions
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    async fn get_user_subscription(&self, subscription_id: Uuid) -> AppResult<UserSubscription> {
        let mut state = self.lock();
        state.read_calls += 1;
        state
            .subscriptions
            .iter()
            .find(|s| s.id == subscription_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> AppResult<CheckoutSession> {
        let transaction_id = Uuid::new_v4();

        let mut checkout_url = Url::parse(&request.return_url)
            .map_err(|e| AppError::Upstream {
                status: 400,
                message: format!("Invalid return URL: {e}"),
            })?;
        checkout_url
            .query_pairs_mut()
            .append_pair("checkout", "dummy")
            .append_pair("transaction_id", &transaction_id.to_string());

        let mut state = self.lock();
        if !state
            .subscriptions
            .iter()
            .any(|s| s.id == request.user_subscription_id)
        {
            return Err(AppError::NotFound);
        }

        state.initiate_requests.push(request.clone());
        state.transactions.push(PaymentTransaction {
            id: transaction_id,
            user_subscription_id: request.user_subscription_id,
            client_reference: client_reference(),
            amount: request.amount,
            currency: "GHS".to_string(),
            status: TransactionStatus::Pending,
            payment_channel: None,
            payment_type: None,
            created_at: Utc::now(),
        });

        tracing::debug!(
            transaction_id = %transaction_id,
            subscription_id = %request.user_subscription_id,
            "Dummy: Created checkout session"
        );

        Ok(CheckoutSession {
            checkout_url: checkout_url.to_string(),
            transaction_id,
        })
    }

    async fn list_transactions(
        &self,
        subscription_id: Uuid,
    ) -> AppResult<Vec<PaymentTransaction>> {
        let mut transactions: Vec<PaymentTransaction> = self
            .lock()
            .transactions
            .iter()
            .filter(|tx| tx.user_subscription_id == subscription_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    async fn check_transaction_status(&self, transaction_id: Uuid) -> AppResult<TransactionStatus> {
        self.lock().status_calls += 1;

        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }

        let mut state = self.lock();
        let current = state
            .transactions
            .iter()
            .find(|tx| tx.id == transaction_id)
            .map(|tx| tx.status)
            .ok_or(AppError::NotFound)?;

        if self.auto_settle && !current.is_terminal() {
            transition(&mut state, transaction_id, TransactionStatus::Success);
            return Ok(TransactionStatus::Success);
        }

        Ok(current)
    }
}
