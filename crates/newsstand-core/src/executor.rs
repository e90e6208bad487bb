//! Query executor boundary.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::query::BuiltQuery;
use crate::row::{HouseRow, ItemRow, ItemSummaryRow};

/// Runs built queries against the relational store.
///
/// Queries use `?` placeholders; a list parameter bound to `IN(?)` must be
/// expanded into one placeholder per element (see [`BuiltQuery::expand`]).
/// Rows are decoded into the record type of the table being read.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Fetch `tblRealm` house rows.
    async fn fetch_houses(&self, query: &BuiltQuery) -> Result<Vec<HouseRow>, StoreError>;

    /// Fetch `tblItemSummary` rows.
    async fn fetch_item_summaries(
        &self,
        query: &BuiltQuery,
    ) -> Result<Vec<ItemSummaryRow>, StoreError>;

    /// Fetch `tblDBCItem` rows.
    async fn fetch_items(&self, query: &BuiltQuery) -> Result<Vec<ItemRow>, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
