//! Lookup cache for repeated queries.
//!
//! Memoizes result sets by [`Fingerprint`] for the lifetime of the process.
//! Entries are never refreshed, evicted or invalidated: the cache is only
//! placed in front of queries whose data is static while the process runs,
//! and stale results are accepted.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::debug;

use super::builder::{build, BuiltQuery};
use super::fingerprint::Fingerprint;
use super::mapping::MappingSet;
use super::params::RequestParams;
use crate::error::{Result, StoreError};

/// Lookup cache configuration.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Maximum number of stored result sets. `None` stores every result.
    ///
    /// Once the bound is reached, queries with new fingerprints still run but
    /// their results are not stored. Existing entries are never evicted. The
    /// bound is checked when a miss starts, so misses already in flight at
    /// that point may still store their results.
    pub max_entries: Option<usize>,
}

impl CacheConfig {
    /// Unbounded cache.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Bound the number of stored result sets.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }
}

/// Cache statistics.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
}

impl CacheStats {
    /// Lookups served from a stored entry.
    pub fn hits(&self) -> u64 {
        self.hits.load(AtomicOrdering::Relaxed)
    }

    /// Lookups that reached the executor, whether or not the fetch succeeded.
    pub fn misses(&self) -> u64 {
        self.misses.load(AtomicOrdering::Relaxed)
    }

    /// Lookups that waited on another caller's in-flight fetch.
    pub fn coalesced(&self) -> u64 {
        self.coalesced.load(AtomicOrdering::Relaxed)
    }

    /// Calculate hit rate (0.0 to 1.0). Coalesced waits count as hits.
    pub fn hit_rate(&self) -> f64 {
        let hits = (self.hits() + self.coalesced()) as f64;
        let total = hits + self.misses() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

type Slot<R> = Arc<OnceCell<Arc<Vec<R>>>>;

/// Process-wide memoization of query results keyed by fingerprint.
///
/// Concurrent misses on the same fingerprint share one fetch: the first
/// caller runs it and the others wait for its result. A failed fetch is not
/// stored: its slot is dropped from the map, and a waiter already holding it
/// runs the fetch again.
pub struct LookupCache<R> {
    entries: DashMap<Fingerprint, Slot<R>>,
    stored: AtomicUsize,
    config: CacheConfig,
    stats: CacheStats,
}

impl<R> LookupCache<R> {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a cache with the given configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            stored: AtomicUsize::new(0),
            config,
            stats: CacheStats::default(),
        }
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of stored result sets.
    pub fn len(&self) -> usize {
        self.stored.load(AtomicOrdering::Relaxed)
    }

    /// Check if no result set is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a stored result set without querying.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<Vec<R>>> {
        self.entries
            .get(fingerprint)
            .and_then(|slot| slot.get().cloned())
    }

    /// Whether `slot` is still the map's slot for `fingerprint`.
    fn holds(&self, fingerprint: &Fingerprint, slot: &Slot<R>) -> bool {
        self.entries
            .get(fingerprint)
            .is_some_and(|current| Arc::ptr_eq(current.value(), slot))
    }

    fn is_full(&self) -> bool {
        self.config
            .max_entries
            .is_some_and(|max| self.len() >= max)
    }
}

impl<R> Default for LookupCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send + Sync> LookupCache<R> {
    /// Build the query for `params` and return its result set, fetching it on
    /// the first request for its fingerprint.
    ///
    /// `fetch` runs at most once per stored fingerprint. Mapping errors are
    /// raised before any lookup; store errors are returned and leave the
    /// fingerprint uncached.
    pub async fn resolve<F, Fut>(
        &self,
        base: &str,
        mappings: &MappingSet,
        params: &RequestParams,
        fetch: F,
    ) -> Result<Arc<Vec<R>>>
    where
        F: FnOnce(BuiltQuery) -> Fut,
        Fut: Future<Output = std::result::Result<Vec<R>, StoreError>>,
    {
        let query = build(base, mappings, params)?;
        let fingerprint = Fingerprint::of(&query);

        if let Some(rows) = self.get(&fingerprint) {
            debug!(fingerprint = %fingerprint, "loading result from cache");
            self.stats.hits.fetch_add(1, AtomicOrdering::Relaxed);
            return Ok(rows);
        }

        if self.is_full() && !self.entries.contains_key(&fingerprint) {
            debug!(fingerprint = %fingerprint, "cache full, querying store without caching");
            self.stats.misses.fetch_add(1, AtomicOrdering::Relaxed);
            return Ok(Arc::new(fetch(query).await?));
        }

        let slot = self
            .entries
            .entry(fingerprint.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let fetched = AtomicBool::new(false);
        let outcome = slot
            .get_or_try_init(|| async {
                fetched.store(true, AtomicOrdering::Relaxed);
                debug!(fingerprint = %fingerprint, "querying store");
                fetch(query).await.map(Arc::new)
            })
            .await
            .cloned();

        let fetched = fetched.load(AtomicOrdering::Relaxed);
        if fetched {
            self.stats.misses.fetch_add(1, AtomicOrdering::Relaxed);
        }

        match outcome {
            Ok(rows) => {
                if !fetched {
                    debug!(fingerprint = %fingerprint, "joined in-flight query");
                    self.stats.coalesced.fetch_add(1, AtomicOrdering::Relaxed);
                } else if self.holds(&fingerprint, &slot) {
                    self.stored.fetch_add(1, AtomicOrdering::Relaxed);
                }
                Ok(rows)
            }
            Err(err) => {
                self.entries.remove_if(&fingerprint, |_, current| {
                    Arc::ptr_eq(current, &slot) && !current.initialized()
                });
                Err(err.into())
            }
        }
    }
}
