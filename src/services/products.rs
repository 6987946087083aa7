// src/services/products.rs
//! Product list/detail fetching and write coordination.
//!
//! Reads go through the query cache (5 minute staleness, keyed by the full
//! filter tuple). Writes invoke the remote API first; only on success are
//! the affected cache scopes invalidated, so a failed write leaves every
//! cache exactly as it was. Failures are terminal per attempt, nothing is
//! retried automatically.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, instrument};

use crate::cache::{CacheKey, CacheScope, QueryCache};
use crate::config::Config;
use crate::dtos::product::{
    CreateProductRequest, ProductPage, UpdateProductRequest, UpdateStockRequest,
};
use crate::error::ApiError;
use crate::filters::ProductFilters;
use crate::http::ApiClient;
use crate::models::product::Product;

const ENDPOINT: &str = "/api/v1/product";

#[derive(Clone)]
pub struct ProductService {
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    stale: Duration,
}

impl ProductService {
    pub fn new(client: Arc<ApiClient>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            client,
            cache,
            stale: config.products_stale,
        }
    }

    /// Fetch one page of products for the given filter tuple.
    #[instrument(skip(self))]
    pub async fn list(&self, filters: &ProductFilters) -> Result<ProductPage, ApiError> {
        self.cache
            .get_or_fetch(CacheKey::products(filters), self.stale, || async move {
                self.client
                    .get(&format!("{ENDPOINT}/get"), &filters.query_pairs())
                    .await
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, ApiError> {
        self.cache
            .get_or_fetch(CacheKey::product(id), self.stale, || async move {
                self.client
                    .get(&format!("{ENDPOINT}/individual/{id}"), &[])
                    .await
            })
            .await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CreateProductRequest) -> Result<Product, ApiError> {
        let product: Product = self
            .client
            .post(&format!("{ENDPOINT}/create"), input)
            .await
            .map_err(|e| {
                error!(?e, "failed to create product");
                e
            })?;
        self.cache.invalidate_scope(CacheScope::Products);
        self.cache.invalidate_scope(CacheScope::Stats);
        Ok(product)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: &UpdateProductRequest) -> Result<Product, ApiError> {
        let product: Product = self
            .client
            .put(&format!("{ENDPOINT}/update/{id}"), input)
            .await?;
        self.invalidate_product(id);
        Ok(product)
    }

    /// Set the stock level, with a free-text audit note persisted alongside
    /// the change.
    #[instrument(skip(self, note))]
    pub async fn update_stock(&self, id: &str, stock: u32, note: &str) -> Result<Product, ApiError> {
        let body = UpdateStockRequest {
            stock,
            note: note.to_string(),
        };
        let product: Product = self
            .client
            .put(&format!("{ENDPOINT}/update-stock/{id}"), &body)
            .await?;
        self.invalidate_product(id);
        // the write produced a new snapshot observation
        self.cache.invalidate_scope(CacheScope::Snapshots);
        Ok(product)
    }

    /// Delete a product. Deleting an id the backend no longer knows is a
    /// `NotFound` error, and on any failure the caches stay untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.delete(&format!("{ENDPOINT}/delete/{id}")).await?;
        self.invalidate_product(id);
        Ok(())
    }

    fn invalidate_product(&self, id: &str) {
        self.cache.invalidate_scope(CacheScope::Products);
        self.cache.invalidate(&CacheKey::product(id));
        self.cache.invalidate_scope(CacheScope::Stats);
    }
}
