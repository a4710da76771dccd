//! Test utilities.
//!
//! This module provides:
//! - Test data factories for plans, subscriptions and transactions
//! - Backend mocks for failure paths the dummy backend can't produce
//! - `TestAppStateBuilder` for HTTP route tests

mod app_state_builder;
mod factories;
mod mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use mocks::*;
