use chrono::NaiveDate;
use dues_types::{AssignmentTarget, PlanStatus};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A dues plan as defined by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target: AssignmentTarget,
    pub member_count: i64,
}

impl SubscriptionPlan {
    /// Plan status on the given day. Both bounds are inclusive for `Active`.
    pub fn status_on(&self, today: NaiveDate) -> PlanStatus {
        if today < self.start_date {
            PlanStatus::Upcoming
        } else if today > self.end_date {
            PlanStatus::Expired
        } else {
            PlanStatus::Active
        }
    }
}
