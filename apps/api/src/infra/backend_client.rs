//! REST client for the organisation backend.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dues_types::{
    AssignmentTarget, CheckoutSession, SubscriptionPaymentStatus, TransactionStatus,
    TransactionStatusUpdate,
};
use reqwest::{Client, Method, StatusCode};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::subscription_backend::{
        InitiatePaymentRequest, SubscriptionBackend, SubscriptionFilter,
    },
    domain::entities::{
        payment_transaction::PaymentTransaction,
        subscription_plan::SubscriptionPlan,
        user_subscription::{PaymentPermission, UserSubscription},
    },
    infra::{error::InfraError, http_client::try_build_client},
};

const DEFAULT_CURRENCY: &str = "GHS";

// ============================================================================
// Wire types
// ============================================================================

/// List responses come either bare or wrapped in a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Paginated { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Paginated { results } => results,
            ListEnvelope::Bare(items) => items,
        }
    }
}

#[derive(Deserialize)]
struct PlanDto {
    id: Uuid,
    name: String,
    #[serde(default)]
    description: Option<String>,
    amount: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(alias = "assigned_to")]
    target: AssignmentTarget,
    #[serde(default)]
    member_count: i64,
}

impl From<PlanDto> for SubscriptionPlan {
    fn from(dto: PlanDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description.filter(|d| !d.is_empty()),
            amount: dto.amount,
            start_date: dto.start_date,
            end_date: dto.end_date,
            target: dto.target,
            member_count: dto.member_count,
        }
    }
}

#[derive(Deserialize)]
struct PaymentPermissionDto {
    allowed: bool,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize)]
struct UserSubscriptionDto {
    id: Uuid,
    #[serde(alias = "plan")]
    plan_id: Uuid,
    plan_name: String,
    #[serde(alias = "member")]
    member_id: Uuid,
    #[serde(default)]
    member_name: Option<String>,
    subscription_amount: Decimal,
    amount_paid: Decimal,
    outstanding_amount: Decimal,
    status: SubscriptionPaymentStatus,
    payment_progress_percentage: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    can_make_payment: PaymentPermissionDto,
    #[serde(default)]
    payment_reference: Option<String>,
    #[serde(default)]
    payment_date: Option<DateTime<Utc>>,
}

impl From<UserSubscriptionDto> for UserSubscription {
    fn from(dto: UserSubscriptionDto) -> Self {
        Self {
            id: dto.id,
            plan_id: dto.plan_id,
            plan_name: dto.plan_name,
            member_id: dto.member_id,
            member_name: dto.member_name,
            subscription_amount: dto.subscription_amount,
            amount_paid: dto.amount_paid,
            outstanding_amount: dto.outstanding_amount,
            status: dto.status,
            payment_progress_percentage: dto.payment_progress_percentage,
            start_date: dto.start_date,
            end_date: dto.end_date,
            can_make_payment: PaymentPermission {
                allowed: dto.can_make_payment.allowed,
                reason: dto.can_make_payment.reason,
            },
            payment_reference: dto.payment_reference,
            payment_date: dto.payment_date,
        }
    }
}

#[derive(Deserialize)]
struct TransactionDto {
    id: Uuid,
    #[serde(alias = "user_subscription")]
    user_subscription_id: Uuid,
    client_reference: String,
    amount: Decimal,
    #[serde(default)]
    currency: Option<String>,
    status: TransactionStatus,
    #[serde(default)]
    payment_channel: Option<String>,
    #[serde(default)]
    payment_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<TransactionDto> for PaymentTransaction {
    fn from(dto: TransactionDto) -> Self {
        Self {
            id: dto.id,
            user_subscription_id: dto.user_subscription_id,
            client_reference: dto.client_reference,
            amount: dto.amount,
            currency: dto
                .currency
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            status: dto.status,
            payment_channel: dto.payment_channel,
            payment_type: dto.payment_type,
            created_at: dto.created_at,
        }
    }
}

#[derive(Serialize)]
struct InitiatePaymentBody<'a> {
    amount: Decimal,
    return_url: &'a str,
}

/// Error bodies vary by endpoint; take the first message field present.
#[derive(Deserialize, Default)]
struct BackendErrorBody {
    detail: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

impl BackendErrorBody {
    fn into_message(self) -> Option<String> {
        self.detail.or(self.error).or(self.message)
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone)]
pub struct RestBackendClient {
    client: Client,
    base_url: Url,
    api_token: Option<SecretString>,
}

impl RestBackendClient {
    pub fn new(base_url: Url, api_token: Option<SecretString>) -> Result<Self, InfraError> {
        let client = try_build_client().map_err(InfraError::HttpClient)?;
        Ok(Self::with_client(client, base_url, api_token))
    }

    pub fn with_client(client: Client, mut base_url: Url, api_token: Option<SecretString>) -> Self {
        // `Url::join` drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            client,
            base_url,
            api_token,
        }
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Internal(format!("Invalid backend path {path}: {e}")))
    }

    async fn send<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, path = %url.path(), error = %e, "Backend request failed");
            AppError::UpstreamUnavailable(e.to_string())
        })?;

        self.handle_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        self.send::<(), T>(Method::GET, url, None).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("Failed to read backend response: {e}"))
        })?;

        if !status.is_success() {
            tracing::error!(status = %status, path = %path, body = %body, "Backend API error");
            return Err(map_error_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(path = %path, body = %body, error = %e, "Failed to parse backend response");
            AppError::UpstreamContract(format!("{path}: {e}"))
        })
    }
}

fn map_error_status(status: StatusCode, body: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::FORBIDDEN => AppError::Forbidden,
        StatusCode::NOT_FOUND => AppError::NotFound,
        _ => {
            let message = serde_json::from_str::<BackendErrorBody>(body)
                .ok()
                .and_then(BackendErrorBody::into_message)
                .unwrap_or_default();
            AppError::Upstream {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl SubscriptionBackend for RestBackendClient {
    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let url = self.url("subscriptions/plans/")?;
        let list: ListEnvelope<PlanDto> = self.get(url).await?;
        Ok(list.into_items().into_iter().map(Into::into).collect())
    }

    async fn get_plan(&self, plan_id: Uuid) -> AppResult<SubscriptionPlan> {
        let url = self.url(&format!("subscriptions/plans/{plan_id}/"))?;
        let plan: PlanDto = self.get(url).await?;
        Ok(plan.into())
    }

    async fn list_user_subscriptions(
        &self,
        filter: &SubscriptionFilter,
    ) -> AppResult<Vec<UserSubscription>> {
        let mut url = self.url("subscriptions/user-subscriptions/")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(member_id) = filter.member_id {
                query.append_pair("member", &member_id.to_string());
            }
            if let Some(status) = filter.status {
                query.append_pair("status", status.as_ref());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        let list: ListEnvelope<UserSubscriptionDto> = self.get(url).await?;
        Ok(list.into_items().into_iter().map(Into::into).collect())
    }

    async fn get_user_subscription(&self, subscription_id: Uuid) -> AppResult<UserSubscription> {
        let url = self.url(&format!(
            "subscriptions/user-subscriptions/{subscription_id}/"
        ))?;
        let subscription: UserSubscriptionDto = self.get(url).await?;
        Ok(subscription.into())
    }

    async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> AppResult<CheckoutSession> {
        let url = self.url(&format!(
            "subscriptions/user-subscriptions/{}/initiate-payment/",
            request.user_subscription_id
        ))?;
        let body = InitiatePaymentBody {
            amount: request.amount,
            return_url: &request.return_url,
        };
        self.send(Method::POST, url, Some(&body)).await
    }

    async fn list_transactions(
        &self,
        subscription_id: Uuid,
    ) -> AppResult<Vec<PaymentTransaction>> {
        let url = self.url(&format!(
            "subscriptions/user-subscriptions/{subscription_id}/transactions/"
        ))?;
        let list: ListEnvelope<TransactionDto> = self.get(url).await?;
        Ok(list.into_items().into_iter().map(Into::into).collect())
    }

    async fn check_transaction_status(&self, transaction_id: Uuid) -> AppResult<TransactionStatus> {
        let url = self.url(&format!("subscriptions/transactions/{transaction_id}/status/"))?;
        let update: TransactionStatusUpdate = self.get(url).await?;

        if update.transaction_id != transaction_id {
            tracing::error!(
                requested = %transaction_id,
                returned = %update.transaction_id,
                "Backend returned status for a different transaction"
            );
            return Err(AppError::UpstreamContract(
                "status response for a different transaction".into(),
            ));
        }

        Ok(update.status)
    }
}
