//! Shared types for the choir dues service.
//!
//! This crate provides:
//! - Payment status enums for user subscriptions and payment transactions
//! - Plan status and assignment target enums
//! - Display descriptors (label + tone) for every status value
//! - API error codes and response types

mod display;
mod errors;
mod plan;
mod responses;
mod subscription;
mod transaction;

pub use display::{StatusDescriptor, Tone};
pub use errors::ErrorCode;
pub use plan::{AssignmentTarget, PlanStatus};
pub use responses::{CheckoutSession, ErrorBody, TransactionStatusUpdate};
pub use subscription::SubscriptionPaymentStatus;
pub use transaction::TransactionStatus;
