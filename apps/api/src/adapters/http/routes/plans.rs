//! Plan routes.

use super::common::*;
use crate::application::views::PlanView;

/// GET /api/plans
async fn list_plans(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let plans = app_state.plan_use_cases.list().await?;

    let views: Vec<PlanView> = plans.iter().map(|p| PlanView::new(p, today)).collect();
    Ok(Json(views))
}

/// GET /api/plans/{id}
async fn get_plan(
    State(app_state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let plan = app_state.plan_use_cases.get(plan_id).await?;
    Ok(Json(PlanView::new(&plan, Utc::now().date_naive())))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans))
        .route("/{id}", get(get_plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use chrono::Duration;

    use crate::test_utils::{TestAppStateBuilder, create_test_plan};

    fn build_test_router(app_state: AppState) -> Router<()> {
        router().with_state(app_state)
    }

    #[tokio::test]
    async fn list_plans_returns_derived_status() {
        let today = Utc::now().date_naive();
        let active = create_test_plan(|p| {
            p.name = "Annual Dues".into();
            p.start_date = today - Duration::days(10);
            p.end_date = today + Duration::days(10);
        });
        let upcoming = create_test_plan(|p| {
            p.name = "Harvest Levy".into();
            p.start_date = today + Duration::days(1);
            p.end_date = today + Duration::days(30);
        });
        let app_state = TestAppStateBuilder::new()
            .with_plan(active)
            .with_plan(upcoming)
            .build();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body[0]["status"], "active");
        assert_eq!(body[0]["status_badge"]["label"], "Active");
        assert_eq!(body[1]["status"], "upcoming");
        assert_eq!(body[1]["status_badge"]["tone"], "info");
    }

    #[tokio::test]
    async fn get_unknown_plan_returns_404() {
        let server =
            TestServer::new(build_test_router(TestAppStateBuilder::new().build())).unwrap();

        let response = server.get(&format!("/{}", Uuid::new_v4())).await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
