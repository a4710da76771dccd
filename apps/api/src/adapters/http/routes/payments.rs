//! Payment initiation and checkout return routes.

use super::common::*;
use crate::application::views::CheckoutReturnView;

#[derive(Deserialize)]
struct InitiatePaymentPayload {
    /// Missing amounts are validated like zero
    #[serde(default)]
    amount: Option<Decimal>,
}

/// POST /api/subscriptions/{id}/payments
/// Validates the amount, starts a hosted checkout and remembers it for the
/// caller's browser session. The dashboard navigates to `checkout_url`.
async fn initiate_payment(
    State(app_state): State<AppState>,
    Path(subscription_id): Path<Uuid>,
    jar: CookieJar,
    Json(payload): Json<InitiatePaymentPayload>,
) -> AppResult<impl IntoResponse> {
    let (jar, session) = ensure_session(jar, app_state.config.secure_cookies);

    let checkout = app_state
        .payment_use_cases
        .initiate(
            &session,
            subscription_id,
            payload.amount.unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, jar, Json(checkout)))
}

/// GET /api/payments/return
/// Called by the dashboard's return page after the gateway redirect.
async fn checkout_return(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let session = current_session(&jar).ok_or(AppError::NoPendingPayment)?;

    let outcome = app_state
        .payment_use_cases
        .complete_checkout(&session)
        .await?;

    Ok(Json(CheckoutReturnView::from(&outcome)))
}

/// Routes mounted under `/subscriptions`.
pub(crate) fn subscription_router() -> Router<AppState> {
    Router::new().route("/{id}/payments", post(initiate_payment))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/return", get(checkout_return))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use dues_types::TransactionStatus;
    use serde_json::json;

    use crate::domain::entities::user_subscription::PaymentPermission;
    use crate::test_utils::{TestAppStateBuilder, create_test_user_subscription};

    fn build_test_router(app_state: AppState) -> Router<()> {
        subscription_router()
            .merge(Router::new().nest("/payments", router()))
            .with_state(app_state)
    }

    #[tokio::test]
    async fn initiate_returns_checkout_and_sets_session_cookie() {
        let sub = create_test_user_subscription(|_| {});
        let (app_state, backend, store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post(&format!("/{}/payments", sub.id))
            .json(&json!({ "amount": "25.00" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<serde_json::Value>();
        assert!(body["checkout_url"].as_str().unwrap().starts_with("http"));
        assert_eq!(backend.initiate_calls(), 1);

        let cookie = response.cookie(SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let pending = store.peek(&SessionKey::new(cookie.value())).unwrap();
        assert_eq!(body["transaction_id"], pending.transaction_id.to_string());
        assert_eq!(pending.subscription_name, sub.plan_name);
    }

    #[tokio::test]
    async fn initiate_reuses_existing_session() {
        let sub = create_test_user_subscription(|_| {});
        let (app_state, _backend, store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post(&format!("/{}/payments", sub.id))
            .add_cookie(Cookie::new(SESSION_COOKIE, "existing-session"))
            .json(&json!({ "amount": 10 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert!(store.peek(&SessionKey::new("existing-session")).is_some());
    }

    #[tokio::test]
    async fn amount_above_outstanding_returns_400_without_backend_call() {
        let sub = create_test_user_subscription(|s| {
            s.outstanding_amount = Decimal::new(7500, 2);
        });
        let (app_state, backend, _store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post(&format!("/{}/payments", sub.id))
            .json(&json!({ "amount": 200 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(
            body["message"],
            "Amount cannot exceed outstanding balance of GH₵ 75.00"
        );
        assert_eq!(backend.initiate_calls(), 0);
    }

    #[tokio::test]
    async fn missing_amount_is_rejected() {
        let sub = create_test_user_subscription(|_| {});
        let (app_state, backend, _store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post(&format!("/{}/payments", sub.id))
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert_eq!(
            body["message"],
            "Please enter a valid amount greater than zero"
        );
        assert_eq!(backend.initiate_calls(), 0);
    }

    #[tokio::test]
    async fn not_allowed_returns_422_with_reason() {
        let sub = create_test_user_subscription(|s| {
            s.can_make_payment = PaymentPermission::denied("Plan has not started yet");
        });
        let (app_state, backend, _store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post(&format!("/{}/payments", sub.id))
            .json(&json!({ "amount": 10 }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["code"], "PAYMENT_NOT_ALLOWED");
        assert_eq!(body["message"], "Plan has not started yet");
        assert_eq!(backend.initiate_calls(), 0);
    }

    #[tokio::test]
    async fn fully_paid_returns_409() {
        let sub = create_test_user_subscription(|s| {
            s.amount_paid = s.subscription_amount;
            s.outstanding_amount = Decimal::ZERO;
            s.status = dues_types::SubscriptionPaymentStatus::FullyPaid;
        });
        let (app_state, backend, _store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post(&format!("/{}/payments", sub.id))
            .json(&json!({ "amount": 10 }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["code"], "ALREADY_PAID");
        assert_eq!(backend.initiate_calls(), 0);
    }

    #[tokio::test]
    async fn checkout_return_reports_status() {
        let sub = create_test_user_subscription(|s| s.plan_name = "2026 Annual Dues".into());
        let (app_state, backend, _store) = TestAppStateBuilder::new()
            .with_subscription(sub.clone())
            .build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let initiated = server
            .post(&format!("/{}/payments", sub.id))
            .json(&json!({ "amount": 10 }))
            .await;
        let session = initiated.cookie(SESSION_COOKIE);
        let body = initiated.json::<serde_json::Value>();
        let tx_id: Uuid = body["transaction_id"].as_str().unwrap().parse().unwrap();
        backend.set_transaction_status(tx_id, TransactionStatus::Failed);

        let response = server
            .get("/payments/return")
            .add_cookie(Cookie::new(SESSION_COOKIE, session.value().to_owned()))
            .await;

        response.assert_status(StatusCode::OK);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["transaction_id"], tx_id.to_string());
        assert_eq!(body["subscription_name"], "2026 Annual Dues");
        assert_eq!(body["status"], "failed");
        assert_eq!(body["status_label"], "Failed");
        assert_eq!(body["status_tone"], "danger");
    }

    #[tokio::test]
    async fn checkout_return_without_session_returns_no_pending_payment() {
        let server =
            TestServer::new(build_test_router(TestAppStateBuilder::new().build())).unwrap();

        let response = server.get("/payments/return").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["code"], "NO_PENDING_PAYMENT");
    }
}
