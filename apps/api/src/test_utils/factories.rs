//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use dues_types::{AssignmentTarget, SubscriptionPaymentStatus, TransactionStatus};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::{
    domain::entities::{
        payment_transaction::PaymentTransaction,
        subscription_plan::SubscriptionPlan,
        user_subscription::{PaymentPermission, UserSubscription},
    },
    infra::config::{AppConfig, BackendMode},
};

/// Create a test plan running through 2026.
pub fn create_test_plan(overrides: impl FnOnce(&mut SubscriptionPlan)) -> SubscriptionPlan {
    let mut plan = SubscriptionPlan {
        id: Uuid::new_v4(),
        name: "2026 Annual Dues".to_string(),
        description: Some("Yearly membership dues".to_string()),
        amount: Decimal::new(15000, 2),
        start_date: test_date(2026, 1, 1),
        end_date: test_date(2026, 12, 31),
        target: AssignmentTarget::Both,
        member_count: 42,
    };
    overrides(&mut plan);
    plan
}

/// Create a half-paid subscription that can still be paid towards.
pub fn create_test_user_subscription(
    overrides: impl FnOnce(&mut UserSubscription),
) -> UserSubscription {
    let mut sub = UserSubscription {
        id: Uuid::new_v4(),
        plan_id: Uuid::new_v4(),
        plan_name: "2026 Annual Dues".to_string(),
        member_id: Uuid::new_v4(),
        member_name: Some("Ama Mensah".to_string()),
        subscription_amount: Decimal::new(15000, 2),
        amount_paid: Decimal::new(7500, 2),
        outstanding_amount: Decimal::new(7500, 2),
        status: SubscriptionPaymentStatus::PartiallyPaid,
        payment_progress_percentage: Decimal::from(50),
        start_date: test_date(2026, 1, 1),
        end_date: test_date(2026, 12, 31),
        can_make_payment: PaymentPermission::allowed(),
        payment_reference: None,
        payment_date: None,
    };
    overrides(&mut sub);
    sub
}

/// Create a pending transaction for the given subscription.
pub fn create_test_transaction(
    user_subscription_id: Uuid,
    overrides: impl FnOnce(&mut PaymentTransaction),
) -> PaymentTransaction {
    let id = Uuid::new_v4();
    let mut tx = PaymentTransaction {
        id,
        user_subscription_id,
        client_reference: format!("DUES-{}", id.simple()),
        amount: Decimal::from(25),
        currency: "GHS".to_string(),
        status: TransactionStatus::Pending,
        payment_channel: None,
        payment_type: None,
        created_at: test_datetime(),
    };
    overrides(&mut tx);
    tx
}

/// Config for tests: dummy backend, no Redis, read cache off.
pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        app_origin: Url::parse("http://localhost:3000").unwrap(),
        backend_mode: BackendMode::Dummy,
        backend_url: Url::parse("http://127.0.0.1:8000/api/").unwrap(),
        backend_api_token: None,
        redis_url: None,
        pending_payment_ttl_minutes: 30,
        read_cache_ttl_secs: 0,
        secure_cookies: false,
    }
}

/// Fixed date for reproducible tests.
pub fn test_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Fixed timestamp for reproducible tests.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0).unwrap()
}
