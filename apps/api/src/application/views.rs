//! Dashboard-facing views of the read model.
//!
//! Everything here is presentation: amounts are formatted and clamped, never
//! recomputed.

use chrono::{DateTime, NaiveDate, Utc};
use dues_types::{
    AssignmentTarget, PlanStatus, StatusDescriptor, SubscriptionPaymentStatus, Tone,
    TransactionStatus,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    application::error_messages::PAYMENT_NOT_ALLOWED_FALLBACK,
    application::use_cases::{payments::CheckoutOutcome, transactions::TransactionEntry},
    domain::entities::{
        money::{floor_money, format_cedis},
        subscription_plan::SubscriptionPlan,
        user_subscription::UserSubscription,
    },
};

/// Badge data for one status value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BadgeView {
    pub label: &'static str,
    pub tone: Tone,
    pub css_class: &'static str,
}

impl From<StatusDescriptor> for BadgeView {
    fn from(descriptor: StatusDescriptor) -> Self {
        Self {
            label: descriptor.label,
            tone: descriptor.tone,
            css_class: descriptor.css_class(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProgressView {
    pub percentage: Decimal,
    pub label: String,
    pub show_bar: bool,
}

impl ProgressView {
    pub fn from_percentage(percentage: Decimal) -> Self {
        let percentage = percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        let rounded = percentage.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Self {
            percentage,
            label: format!("{rounded}%"),
            show_bar: percentage > Decimal::ZERO && percentage < Decimal::ONE_HUNDRED,
        }
    }
}

/// What the dashboard should render in place of the pay button.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayAction {
    Hidden,
    Disabled { reason: String },
    Available {
        max_amount: Decimal,
        max_amount_display: String,
    },
}

impl PayAction {
    pub fn for_subscription(subscription: &UserSubscription) -> Self {
        if !subscription.has_balance() {
            return PayAction::Hidden;
        }

        if !subscription.can_make_payment.allowed {
            let reason = subscription
                .can_make_payment
                .reason
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| PAYMENT_NOT_ALLOWED_FALLBACK.to_string());
            return PayAction::Disabled { reason };
        }

        let max_amount = floor_money(subscription.outstanding());
        PayAction::Available {
            max_amount,
            max_amount_display: format_cedis(max_amount),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub subscription_amount: Decimal,
    pub subscription_amount_display: String,
    pub amount_paid: Decimal,
    pub amount_paid_display: String,
    pub outstanding_amount: Decimal,
    pub outstanding_display: String,
    pub status: SubscriptionPaymentStatus,
    pub status_badge: BadgeView,
    pub progress: ProgressView,
    pub pay_action: PayAction,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

impl From<&UserSubscription> for SubscriptionView {
    fn from(sub: &UserSubscription) -> Self {
        let outstanding = sub.outstanding();

        Self {
            id: sub.id,
            plan_id: sub.plan_id,
            plan_name: sub.plan_name.clone(),
            member_id: sub.member_id,
            member_name: sub.member_name.clone(),
            subscription_amount: sub.subscription_amount,
            subscription_amount_display: format_cedis(sub.subscription_amount),
            amount_paid: sub.amount_paid,
            amount_paid_display: format_cedis(sub.amount_paid),
            outstanding_amount: outstanding,
            outstanding_display: format_cedis(outstanding),
            status: sub.status,
            status_badge: sub.status.descriptor().into(),
            progress: ProgressView::from_percentage(sub.progress()),
            pay_action: PayAction::for_subscription(sub),
            start_date: sub.start_date,
            end_date: sub.end_date,
            payment_reference: sub.payment_reference.clone(),
            payment_date: sub.payment_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub amount_display: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target: AssignmentTarget,
    pub target_label: &'static str,
    pub member_count: i64,
    pub status: PlanStatus,
    pub status_badge: BadgeView,
}

impl PlanView {
    pub fn new(plan: &SubscriptionPlan, today: NaiveDate) -> Self {
        let status = plan.status_on(today);

        Self {
            id: plan.id,
            name: plan.name.clone(),
            description: plan.description.clone(),
            amount: plan.amount,
            amount_display: format_cedis(plan.amount),
            start_date: plan.start_date,
            end_date: plan.end_date,
            target: plan.target,
            target_label: plan.target.label(),
            member_count: plan.member_count,
            status,
            status_badge: status.descriptor().into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub id: Uuid,
    pub user_subscription_id: Uuid,
    pub client_reference: String,
    pub amount: Decimal,
    pub amount_display: String,
    pub currency: String,
    pub status: TransactionStatus,
    pub status_badge: BadgeView,
    pub is_terminal: bool,
    pub payment_channel: Option<String>,
    pub payment_type: Option<String>,
    pub created_at: DateTime<Utc>,
    /// True while a status check for this transaction is in flight
    pub checking: bool,
}

impl From<&TransactionEntry> for TransactionView {
    fn from(entry: &TransactionEntry) -> Self {
        let tx = &entry.transaction;

        Self {
            id: tx.id,
            user_subscription_id: tx.user_subscription_id,
            client_reference: tx.client_reference.clone(),
            amount: tx.amount,
            amount_display: format_cedis(tx.amount),
            currency: tx.currency.clone(),
            status: tx.status,
            status_badge: tx.status.descriptor().into(),
            is_terminal: tx.status.is_terminal(),
            payment_channel: tx.payment_channel.clone(),
            payment_type: tx.payment_type.clone(),
            created_at: tx.created_at,
            checking: entry.checking,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionStatusView {
    pub transaction_id: Uuid,
    pub status: TransactionStatus,
    pub status_badge: BadgeView,
    pub is_terminal: bool,
}

impl TransactionStatusView {
    pub fn new(transaction_id: Uuid, status: TransactionStatus) -> Self {
        Self {
            transaction_id,
            status,
            status_badge: status.descriptor().into(),
            is_terminal: status.is_terminal(),
        }
    }
}

/// Result of returning from the hosted checkout page.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReturnView {
    pub transaction_id: Uuid,
    pub subscription_name: String,
    pub status: TransactionStatus,
    pub status_label: &'static str,
    pub status_tone: Tone,
}

impl From<&CheckoutOutcome> for CheckoutReturnView {
    fn from(outcome: &CheckoutOutcome) -> Self {
        let descriptor = outcome.status.descriptor();

        Self {
            transaction_id: outcome.transaction_id,
            subscription_name: outcome.subscription_name.clone(),
            status: outcome.status,
            status_label: descriptor.label,
            status_tone: descriptor.tone,
        }
    }
}
