// src/services/categories.rs
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::cache::{CacheKey, CacheScope, QueryCache};
use crate::config::Config;
use crate::dtos::category::CreateCategoryRequest;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::category::Category;

const ENDPOINT: &str = "/api/v1/category";

#[derive(Clone)]
pub struct CategoryService {
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    stale: Duration,
}

impl CategoryService {
    pub fn new(client: Arc<ApiClient>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            client,
            cache,
            stale: config.categories_stale,
        }
    }

    /// Category list, cached for 10 minutes.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.cache
            .get_or_fetch(CacheKey::categories(), self.stale, || async move {
                self.client.get(&format!("{ENDPOINT}/get"), &[]).await
            })
            .await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CreateCategoryRequest) -> Result<Category, ApiError> {
        let category: Category = self
            .client
            .post(&format!("{ENDPOINT}/create"), input)
            .await?;
        self.cache.invalidate_scope(CacheScope::Categories);
        Ok(category)
    }
}
