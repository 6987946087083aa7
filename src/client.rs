// src/client.rs
use std::sync::Arc;

use crate::cache::QueryCache;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::services::auth::AuthService;
use crate::services::categories::CategoryService;
use crate::services::email::EmailService;
use crate::services::inventory::InventoryService;
use crate::services::products::ProductService;
use crate::session::SessionContext;

/// Entry point wiring one HTTP client, one session, and one query cache
/// into the per-domain services.
#[derive(Clone)]
pub struct FlipprClient {
    config: Config,
    session: SessionContext,
    pub products: ProductService,
    pub categories: CategoryService,
    pub inventory: InventoryService,
    pub auth: AuthService,
    pub email: EmailService,
}

impl FlipprClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Self::with_session(config, SessionContext::new())
    }

    /// Build a client around an existing session (e.g. a token read from
    /// the auth cookie).
    pub fn with_session(config: Config, session: SessionContext) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(&config, session.clone())?);
        let cache = Arc::new(QueryCache::new());
        Ok(Self {
            products: ProductService::new(api.clone(), cache.clone(), &config),
            categories: CategoryService::new(api.clone(), cache.clone(), &config),
            inventory: InventoryService::new(api.clone(), cache.clone(), &config),
            auth: AuthService::new(api.clone()),
            email: EmailService::new(api),
            config,
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Controller for the product-list dashboard view.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.products.clone(), self.config.search_debounce)
    }
}
