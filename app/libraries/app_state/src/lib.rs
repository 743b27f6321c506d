use app_config::AppConfig;
use app_cryptography::hash::PasswordHasher;
use app_store::BillingStore;
use chrono::Duration;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn BillingStore>,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn BillingStore>, hasher: PasswordHasher) -> Self {
        Self {
            config,
            store,
            hasher,
        }
    }

    pub fn access_token_lifetime(&self) -> Duration {
        Duration::minutes(self.config.jwt_access_session_minutes)
    }
}
