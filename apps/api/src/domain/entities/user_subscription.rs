use chrono::{DateTime, NaiveDate, Utc};
use dues_types::SubscriptionPaymentStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the backend allows the member to pay right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPermission {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl PaymentPermission {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// A member's assignment to a plan, as computed by the backend.
///
/// Amounts and progress are never recomputed here. `outstanding()` and
/// `progress()` only clamp what the backend reported.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSubscription {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub subscription_amount: Decimal,
    pub amount_paid: Decimal,
    pub outstanding_amount: Decimal,
    pub status: SubscriptionPaymentStatus,
    pub payment_progress_percentage: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub can_make_payment: PaymentPermission,
    pub payment_reference: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

impl UserSubscription {
    pub fn outstanding(&self) -> Decimal {
        self.outstanding_amount.max(Decimal::ZERO)
    }

    pub fn progress(&self) -> Decimal {
        self.payment_progress_percentage
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// True when there is still something to pay. Says nothing about
    /// whether the backend currently permits it.
    pub fn has_balance(&self) -> bool {
        !self.status.is_settled() && self.outstanding() > Decimal::ZERO
    }
}
