use super::common::*;
use crate::application::views::{TransactionStatusView, TransactionView};

/// GET /api/subscriptions/{id}/transactions
async fn list_transactions(
    State(app_state): State<AppState>,
    Path(subscription_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let entries = app_state
        .transaction_use_cases
        .list(subscription_id)
        .await?;

    let views: Vec<TransactionView> = entries.iter().map(TransactionView::from).collect();
    Ok(Json(views))
}

/// POST /api/transactions/{id}/check-status
/// One status check against the backend. A check already running for the
/// same transaction yields 409.
async fn check_status(
    State(app_state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let status = app_state
        .transaction_use_cases
        .check_status(transaction_id)
        .await?;

    Ok(Json(TransactionStatusView::new(transaction_id, status)))
}

/// Routes mounted under `/subscriptions`.
pub(crate) fn subscription_router() -> Router<AppState> {
    Router::new().route("/{id}/transactions", get(list_transactions))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/{id}/check-status", post(check_status))
}
