pub mod money;
pub mod payment_transaction;
pub mod pending_payment;
pub mod subscription_plan;
pub mod user_subscription;
