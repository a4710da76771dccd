use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        payments::PaymentUseCases, plans::PlanUseCases, subscriptions::SubscriptionUseCases,
        transactions::TransactionUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub subscription_use_cases: Arc<SubscriptionUseCases>,
    pub plan_use_cases: Arc<PlanUseCases>,
    pub payment_use_cases: Arc<PaymentUseCases>,
    pub transaction_use_cases: Arc<TransactionUseCases>,
}
