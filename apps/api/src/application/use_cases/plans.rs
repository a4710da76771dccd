use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::AppResult, application::ports::subscription_backend::SubscriptionBackend,
    domain::entities::subscription_plan::SubscriptionPlan,
};

#[derive(Clone)]
pub struct PlanUseCases {
    backend: Arc<dyn SubscriptionBackend>,
}

impl PlanUseCases {
    pub fn new(backend: Arc<dyn SubscriptionBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<SubscriptionPlan>> {
        self.backend.list_plans().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, plan_id: Uuid) -> AppResult<SubscriptionPlan> {
        self.backend.get_plan(plan_id).await
    }
}
