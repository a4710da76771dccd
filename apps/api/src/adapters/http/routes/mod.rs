//! Dashboard API routes.
//!
//! # Route Groups
//!
//! - **Plans** (2 routes): plan list and detail with derived status
//! - **Subscriptions** (4 routes): subscription views, transaction list, payment initiation
//! - **Payments** (1 route): return from hosted checkout
//! - **Transactions** (1 route): manual status check
//! - **Health** (1 route)

mod common;
mod payments;
mod plans;
mod subscriptions;
mod transactions;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::adapters::http::app_state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/plans", plans::router())
        .nest(
            "/subscriptions",
            subscriptions::router()
                .merge(payments::subscription_router())
                .merge(transactions::subscription_router()),
        )
        .nest("/payments", payments::router())
        .nest("/transactions", transactions::router())
}
