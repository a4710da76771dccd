pub mod pending_payment_store;
pub mod subscription_backend;
