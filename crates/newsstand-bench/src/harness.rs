//! Benchmark harness: an in-memory executor with fixed results.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use newsstand_core::{
    BuiltQuery, HouseRow, ItemRow, ItemSummaryRow, QueryExecutor, StoreError,
};

/// Executor answering every query from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticExecutor {
    houses: Vec<HouseRow>,
}

impl StaticExecutor {
    /// Executor returning `houses` for every house lookup.
    pub fn with_houses(houses: impl IntoIterator<Item = u32>) -> Self {
        Self {
            houses: houses.into_iter().map(|house| HouseRow { house }).collect(),
        }
    }
}

#[async_trait]
impl QueryExecutor for StaticExecutor {
    async fn fetch_houses(&self, _query: &BuiltQuery) -> Result<Vec<HouseRow>, StoreError> {
        Ok(self.houses.clone())
    }

    async fn fetch_item_summaries(
        &self,
        query: &BuiltQuery,
    ) -> Result<Vec<ItemSummaryRow>, StoreError> {
        let item = query
            .params
            .last()
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Ok(self
            .houses
            .iter()
            .map(|row| ItemSummaryRow {
                house: row.house,
                item,
                level: 0,
                price: 10_000,
                quantity: 1,
                lastseen: NaiveDateTime::default(),
            })
            .collect())
    }

    async fn fetch_items(&self, _query: &BuiltQuery) -> Result<Vec<ItemRow>, StoreError> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
