use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::{
            pending_payment_store::PendingPaymentStore, subscription_backend::SubscriptionBackend,
        },
        use_cases::{
            payments::PaymentUseCases, plans::PlanUseCases, subscriptions::SubscriptionUseCases,
            transactions::TransactionUseCases,
        },
    },
    infra::{
        backend_client::RestBackendClient,
        config::{AppConfig, BackendMode},
        dummy_backend::DummyBackend,
        error::InfraError,
        pending_payments::{InMemoryPendingPaymentStore, RedisPendingPaymentStore},
        read_cache::CachedBackend,
    },
};
use chrono::Utc;
use redis::aio::ConnectionManager;
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let backend: Arc<dyn SubscriptionBackend> = match config.backend_mode {
        BackendMode::Http => {
            info!(backend_url = %config.backend_url, "Using REST backend");
            Arc::new(RestBackendClient::new(
                config.backend_url.clone(),
                config.backend_api_token.clone(),
            )?)
        }
        BackendMode::Dummy => {
            warn!("Using dummy backend; payments are simulated");
            Arc::new(DummyBackend::with_sample_data(Utc::now().date_naive()))
        }
    };

    let pending_store = init_pending_store(config.redis_url.as_deref()).await?;

    Ok(build_app_state(config, backend, pending_store))
}

/// Wires use cases around a backend and a pending payment store.
pub fn build_app_state(
    config: AppConfig,
    backend: Arc<dyn SubscriptionBackend>,
    pending_store: Arc<dyn PendingPaymentStore>,
) -> AppState {
    let backend: Arc<dyn SubscriptionBackend> = Arc::new(CachedBackend::new(
        backend,
        Duration::from_secs(config.read_cache_ttl_secs),
    ));

    let transaction_use_cases = Arc::new(TransactionUseCases::new(backend.clone()));
    let payment_use_cases = PaymentUseCases::new(
        backend.clone(),
        pending_store,
        transaction_use_cases.clone(),
        config.checkout_return_url(),
        chrono::Duration::minutes(config.pending_payment_ttl_minutes),
    );

    AppState {
        subscription_use_cases: Arc::new(SubscriptionUseCases::new(backend.clone())),
        plan_use_cases: Arc::new(PlanUseCases::new(backend)),
        payment_use_cases: Arc::new(payment_use_cases),
        transaction_use_cases,
        config: Arc::new(config),
    }
}

async fn init_pending_store(
    redis_url: Option<&str>,
) -> Result<Arc<dyn PendingPaymentStore>, InfraError> {
    match redis_url {
        Some(url) => {
            let client = redis::Client::open(url)?;
            let manager = ConnectionManager::new(client).await?;
            info!("Pending payments stored in Redis");
            Ok(Arc::new(RedisPendingPaymentStore::new(manager)))
        }
        None => {
            warn!("REDIS_URL not set; pending payments are kept in process memory");
            Ok(Arc::new(InMemoryPendingPaymentStore::new()))
        }
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dues_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped if the file can't be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
