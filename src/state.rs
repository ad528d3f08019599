use std::sync::Arc;

use crate::auth::{AdminCredentials, TokenService};
use crate::config::AppConfig;
use crate::database::CatalogStore;

/// Shared, read-only dependencies handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn CatalogStore>,
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn CatalogStore>,
        tokens: TokenService,
        credentials: AdminCredentials,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
        }
    }
}
