//! Market lookups: statements, mapping sets and the service that runs them.

use std::sync::{Arc, OnceLock};

use tracing::{debug, instrument};

use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::query::{
    build, CacheConfig, CacheStats, FieldMapping, LookupCache, MappingSet, RequestParams,
};
use crate::row::{HouseRow, ItemRow, ItemSummaryRow};
use crate::value::Value;

/// Statement resolving the houses of a realm.
pub const HOUSES_SQL: &str = "SELECT house FROM tblRealm";

/// Statement reading item price summaries.
pub const ITEM_SUMMARY_SQL: &str =
    "SELECT house, item, level, price, quantity, lastseen FROM tblItemSummary";

/// Statement reading static item definitions.
pub const ITEMS_SQL: &str = "SELECT id, name_enus, quality, level, class, subclass, icon, \
     stacksize, buyfromvendor, selltovendor, auctionable FROM tblDBCItem";

/// Request fields accepted when resolving houses.
pub fn realm_mappings() -> &'static MappingSet {
    static SET: OnceLock<MappingSet> = OnceLock::new();
    SET.get_or_init(|| {
        MappingSet::new()
            .field("realmId", "blizzId")
            .field("region", "region")
            .field("realm", "slug")
            .field("house", "house")
    })
}

/// Fields of the price summary query.
pub fn item_summary_mappings() -> &'static MappingSet {
    static SET: OnceLock<MappingSet> = OnceLock::new();
    SET.get_or_init(|| {
        MappingSet::new()
            .field("house", FieldMapping::membership("house"))
            .field("id", "item")
    })
}

/// Fields of the item definition query.
pub fn item_mappings() -> &'static MappingSet {
    static SET: OnceLock<MappingSet> = OnceLock::new();
    SET.get_or_init(|| {
        MappingSet::new()
            .field("id", "id")
            .field("auctionable", "auctionable")
    })
}

/// Read-only market lookups over a query executor.
///
/// House resolution runs before every price lookup, so its results are kept
/// in a [`LookupCache`] for the lifetime of the service.
pub struct MarketService {
    executor: Arc<dyn QueryExecutor>,
    houses: LookupCache<HouseRow>,
}

impl MarketService {
    /// Create a service with an unbounded house cache.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::with_cache_config(executor, CacheConfig::default())
    }

    /// Create a service with the given house cache configuration.
    pub fn with_cache_config(executor: Arc<dyn QueryExecutor>, config: CacheConfig) -> Self {
        Self {
            executor,
            houses: LookupCache::with_config(config),
        }
    }

    /// The underlying executor.
    pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
        &self.executor
    }

    /// House cache statistics.
    pub fn house_cache_stats(&self) -> &CacheStats {
        self.houses.stats()
    }

    /// Number of cached house lookups.
    pub fn house_cache_len(&self) -> usize {
        self.houses.len()
    }

    /// Resolve the houses matching `params` (`realmId`, `region`, `realm`, `house`).
    #[instrument(skip_all)]
    pub async fn houses(&self, params: &RequestParams) -> Result<Arc<Vec<HouseRow>>> {
        let executor = &self.executor;
        self.houses
            .resolve(HOUSES_SQL, realm_mappings(), params, |query| async move {
                executor.fetch_houses(&query).await
            })
            .await
    }

    /// Price summaries of `item` across the houses matching `params`.
    #[instrument(skip(self, params))]
    pub async fn price_summary(
        &self,
        item: &str,
        params: &RequestParams,
    ) -> Result<Vec<ItemSummaryRow>> {
        let houses = self.houses(params).await?;
        let house_ids: Vec<Value> = houses.iter().map(|row| Value::from(row.house)).collect();
        debug!(houses = house_ids.len(), "resolved houses");

        let summary_params = RequestParams::new()
            .with("house", Value::List(house_ids))
            .with("id", item);
        let query = build(ITEM_SUMMARY_SQL, item_summary_mappings(), &summary_params)?;

        Ok(self.executor.fetch_item_summaries(&query).await?)
    }

    /// All auctionable item definitions.
    pub async fn auctionable_items(&self) -> Result<Vec<ItemRow>> {
        let params = RequestParams::new().with("auctionable", 1);
        let query = build(ITEMS_SQL, item_mappings(), &params)?;
        Ok(self.executor.fetch_items(&query).await?)
    }

    /// Definition of a single item.
    #[instrument(skip(self))]
    pub async fn item(&self, id: &str) -> Result<Vec<ItemRow>> {
        let params = RequestParams::new().with("id", id);
        let query = build(ITEMS_SQL, item_mappings(), &params)?;
        Ok(self.executor.fetch_items(&query).await?)
    }
}
