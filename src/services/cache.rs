// src/services/cache.rs
// DOCUMENTATION: In-memory cache of full place records from detail fetches
// PURPOSE: Serve repeated detail lookups without network access

use crate::errors::PlacesError;
use crate::models::Place;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Detail cache keyed by place identifier
/// DOCUMENTATION: Thread-safe, lives as long as the owning client
/// Entries are never evicted and failed fetches are never cached
#[derive(Default)]
pub struct PlaceCache {
    store: RwLock<HashMap<String, Place>>,
    /// Per-key locks that coalesce concurrent misses
    pending: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PlaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cached value
    pub async fn get(&self, id: &str) -> Option<Place> {
        let store = self.store.read().await;

        match store.get(id) {
            Some(place) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("Cache HIT for place: {}", id);
                Some(place.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!("Cache MISS for place: {}", id);
                None
            }
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.store.read().await.contains_key(id)
    }

    /// Store a record; a later write for the same id replaces it whole
    pub async fn insert(&self, id: impl Into<String>, place: Place) {
        let id = id.into();
        let mut store = self.store.write().await;
        log::debug!("Cache SET for place: {}", id);
        store.insert(id, place);
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Return the cached record or run `fetch` once and cache its success
    /// DOCUMENTATION: Concurrent callers for the same uncached id wait on one
    /// fetch; if it fails the next waiter fetches again
    pub async fn get_or_try_insert_with<F, Fut>(&self, id: &str, fetch: F) -> Result<Place, PlacesError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Place, PlacesError>>,
    {
        if let Some(place) = self.get(id).await {
            return Ok(place);
        }

        let key_lock = {
            let mut pending = self.pending.lock().await;
            pending
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        let result = {
            let _guard = key_lock.lock().await;

            // Filled by another caller while we waited
            let cached = self.store.read().await.get(id).cloned();
            match cached {
                Some(place) => Ok(place),
                None => match fetch().await {
                    Ok(place) => {
                        self.insert(id, place.clone()).await;
                        Ok(place)
                    }
                    Err(e) => Err(e),
                },
            }
        };

        self.release(id, &key_lock).await;
        result
    }

    // Drop the per-key lock once no other caller holds it
    async fn release(&self, id: &str, key_lock: &Arc<Mutex<()>>) {
        let mut pending = self.pending.lock().await;
        if Arc::strong_count(key_lock) <= 2 {
            pending.remove(id);
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn place(id: &str) -> Place {
        Place::new(id, format!("Place {}", id), "MG Road", 12.97, 77.59)
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = PlaceCache::new();
        cache.insert("a", place("a")).await;

        assert_eq!(cache.get("a").await, Some(place("a")));
        assert_eq!(cache.get("b").await, None);

        let stats = cache.stats().await;
        assert_eq!(stats, CacheStats { total_entries: 1, hits: 1, misses: 1 });
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = PlaceCache::new();
        cache.insert("a", place("a")).await;

        let mut renamed = place("a");
        renamed.name = "Renamed".to_string();
        cache.insert("a", renamed.clone()).await;

        assert_eq!(cache.get("a").await, Some(renamed));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_coalesce() {
        let cache = PlaceCache::new();
        let fetches = AtomicUsize::new(0);
        let counter = &fetches;

        let fetch = || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(place("x"))
        };

        let (first, second) = tokio::join!(
            cache.get_or_try_insert_with("x", fetch),
            cache.get_or_try_insert_with("x", fetch),
        );

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(cache.pending.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = PlaceCache::new();

        let err = cache
            .get_or_try_insert_with("x", || async {
                Err(PlacesError::server("500", "boom"))
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "SERVER_ERROR");
        assert!(cache.is_empty().await);

        let ok = cache
            .get_or_try_insert_with("x", || async { Ok(place("x")) })
            .await
            .unwrap();
        assert_eq!(ok.id, "x");
        assert!(cache.contains("x").await);
    }
}
