// src/cache.rs
//! Response cache keyed by filter tuples.
//!
//! Each entry remembers when it was fetched; a hit inside the staleness
//! window returns the cached value with no network call. Concurrent
//! requests for the same key are single-flighted through a per-slot async
//! mutex: one caller fetches, the rest wait and read the freshly stored
//! value. Errors are never cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::dtos::inventory::SnapshotQuery;
use crate::error::ApiError;
use crate::filters::{LogFilters, ProductFilters};

/// Cache namespaces, one per remotely-owned collection. Mutations
/// invalidate whole scopes so no stale key can survive a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheScope {
    Products,
    ProductDetail,
    Categories,
    InventoryLogs,
    Snapshots,
    Stats,
}

/// Cache address: scope plus the full filter tuple (every field, including
/// page). Any differing field is a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub scope: CacheScope,
    pub ident: String,
}

impl CacheKey {
    pub fn products(filters: &ProductFilters) -> Self {
        Self {
            scope: CacheScope::Products,
            ident: pairs_ident(&filters.query_pairs()),
        }
    }

    pub fn product(id: &str) -> Self {
        Self {
            scope: CacheScope::ProductDetail,
            ident: id.to_string(),
        }
    }

    pub fn categories() -> Self {
        Self {
            scope: CacheScope::Categories,
            ident: String::new(),
        }
    }

    pub fn logs(filters: &LogFilters) -> Self {
        Self {
            scope: CacheScope::InventoryLogs,
            ident: pairs_ident(&filters.query_pairs()),
        }
    }

    pub fn snapshots(product_id: &str, query: &SnapshotQuery) -> Self {
        Self {
            scope: CacheScope::Snapshots,
            ident: format!("{}?{}", product_id, pairs_ident(&query.query_pairs())),
        }
    }
}

fn pairs_ident(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

struct Cached {
    value: Value,
    fetched_at: Instant,
}

#[derive(Default)]
struct Slot {
    gate: tokio::sync::Mutex<Option<Cached>>,
}

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, Arc<Slot>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key` if fetched within `ttl`, otherwise
    /// run `fetch` and store its result. Same-key callers are deduplicated.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.entry(key.clone()).or_default().clone()
        };

        let mut guard = slot.gate.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.fetched_at.elapsed() < ttl {
                debug!(?key.scope, ident = %key.ident, "cache hit");
                return Ok(serde_json::from_value(cached.value.clone())?);
            }
        }

        debug!(?key.scope, ident = %key.ident, "cache miss");
        let value = fetch().await?;
        *guard = Some(Cached {
            value: serde_json::to_value(&value)?,
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    pub fn invalidate(&self, key: &CacheKey) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }

    pub fn invalidate_scope(&self, scope: CacheScope) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|key, _| key.scope != scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(ident: &str) -> CacheKey {
        CacheKey {
            scope: CacheScope::Products,
            ident: ident.to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_identical_fetch_hits_cache() {
        let cache = QueryCache::new();
        let calls = &AtomicUsize::new(0);
        let ttl = Duration::from_secs(300);

        for _ in 0..2 {
            let value: u32 = cache
                .get_or_fetch(key("a"), ttl, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_tuple_is_a_miss() {
        let cache = QueryCache::new();
        let calls = &AtomicUsize::new(0);
        let ttl = Duration::from_secs(300);

        for ident in ["page=1", "page=2"] {
            let _: u32 = cache
                .get_or_fetch(key(ident), ttl, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(0)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let cache = QueryCache::new();
        let calls = &AtomicUsize::new(0);

        for _ in 0..2 {
            let _: u32 = cache
                .get_or_fetch(key("a"), Duration::ZERO, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(0)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_flight() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let ttl = Duration::from_secs(300);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(key("a"), ttl, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(42u32)
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new();
        let calls = &AtomicUsize::new(0);
        let ttl = Duration::from_secs(300);

        let first: Result<u32, _> = cache
            .get_or_fetch(key("a"), ttl, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::NotFound("nope".to_string()))
            })
            .await;
        assert!(first.is_err());

        let second: u32 = cache
            .get_or_fetch(key("a"), ttl, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(9)
            })
            .await
            .unwrap();
        assert_eq!(second, 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_scope_removes_entries() {
        let cache = QueryCache::new();
        let calls = &AtomicUsize::new(0);
        let ttl = Duration::from_secs(300);

        let fetch = || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(1u32)
        };
        let _: u32 = cache.get_or_fetch(key("a"), ttl, fetch).await.unwrap();
        let _: u32 = cache
            .get_or_fetch(CacheKey::categories(), ttl, || async { Ok(2u32) })
            .await
            .unwrap();

        cache.invalidate_scope(CacheScope::Products);

        let _: u32 = cache.get_or_fetch(key("a"), ttl, fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // untouched scope still cached
        let untouched: u32 = cache
            .get_or_fetch(CacheKey::categories(), ttl, || async { Ok(3u32) })
            .await
            .unwrap();
        assert_eq!(untouched, 2);
    }
}
