//! Subscription view routes.

use std::str::FromStr;

use dues_types::SubscriptionPaymentStatus;

use super::common::*;
use crate::application::{ports::subscription_backend::SubscriptionFilter, views::SubscriptionView};

#[derive(Deserialize)]
struct ListSubscriptionsQuery {
    member_id: Option<Uuid>,
    status: Option<String>,
}

impl ListSubscriptionsQuery {
    fn into_filter(self) -> AppResult<SubscriptionFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(SubscriptionPaymentStatus::from_str(raw).map_err(|_| {
                AppError::InvalidInput(format!("Unknown subscription status: {raw}"))
            })?),
        };

        Ok(SubscriptionFilter {
            member_id: self.member_id,
            status,
        })
    }
}

/// GET /api/subscriptions?member_id=&status=
async fn list_subscriptions(
    State(app_state): State<AppState>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = query.into_filter()?;
    let subscriptions = app_state.subscription_use_cases.list(&filter).await?;

    let views: Vec<SubscriptionView> = subscriptions.iter().map(SubscriptionView::from).collect();
    Ok(Json(views))
}

/// GET /api/subscriptions/{id}
async fn get_subscription(
    State(app_state): State<AppState>,
    Path(subscription_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let subscription = app_state.subscription_use_cases.get(subscription_id).await?;
    Ok(Json(SubscriptionView::from(&subscription)))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subscriptions))
        .route("/{id}", get(get_subscription))
}
