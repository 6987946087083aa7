// src/services/inventory.rs
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::cache::{CacheKey, QueryCache};
use crate::config::Config;
use crate::dtos::inventory::{LogPage, SnapshotQuery, SnapshotsResponse};
use crate::error::ApiError;
use crate::filters::LogFilters;
use crate::http::ApiClient;
use crate::models::inventory::StockSnapshot;

const ENDPOINT: &str = "/api/v1/inventory";

#[derive(Clone)]
pub struct InventoryService {
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    logs_stale: Duration,
    snapshots_stale: Duration,
}

impl InventoryService {
    pub fn new(client: Arc<ApiClient>, cache: Arc<QueryCache>, config: &Config) -> Self {
        Self {
            client,
            cache,
            logs_stale: config.logs_stale,
            snapshots_stale: config.snapshots_stale,
        }
    }

    /// One page of the activity log for the given filter tuple.
    #[instrument(skip(self))]
    pub async fn logs(&self, filters: &LogFilters) -> Result<LogPage, ApiError> {
        self.cache
            .get_or_fetch(CacheKey::logs(filters), self.logs_stale, || async move {
                self.client
                    .get(&format!("{ENDPOINT}/logs"), &filters.query_pairs())
                    .await
            })
            .await
    }

    /// Time-ordered stock snapshots for one product within the query window.
    #[instrument(skip(self, query))]
    pub async fn snapshots(
        &self,
        product_id: &str,
        query: &SnapshotQuery,
    ) -> Result<Vec<StockSnapshot>, ApiError> {
        let response: SnapshotsResponse = self
            .cache
            .get_or_fetch(
                CacheKey::snapshots(product_id, query),
                self.snapshots_stale,
                || async move {
                    self.client
                        .get(
                            &format!("{ENDPOINT}/snapshots/{product_id}"),
                            &query.query_pairs(),
                        )
                        .await
                },
            )
            .await?;
        Ok(response.snapshots)
    }
}
