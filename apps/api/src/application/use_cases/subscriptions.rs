use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    application::ports::subscription_backend::{SubscriptionBackend, SubscriptionFilter},
    domain::entities::user_subscription::UserSubscription,
};

#[derive(Clone)]
pub struct SubscriptionUseCases {
    backend: Arc<dyn SubscriptionBackend>,
}

impl SubscriptionUseCases {
    pub fn new(backend: Arc<dyn SubscriptionBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &SubscriptionFilter) -> AppResult<Vec<UserSubscription>> {
        self.backend.list_user_subscriptions(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, subscription_id: Uuid) -> AppResult<UserSubscription> {
        self.backend.get_user_subscription(subscription_id).await
    }
}
