//! MySQL query executor.

use std::time::Duration;

use async_trait::async_trait;
use newsstand_core::{
    BuiltQuery, HouseRow, ItemRow, ItemSummaryRow, QueryExecutor, StoreError, Value,
};
use sqlx::mysql::{MySqlArguments, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Decode, MySql, MySqlPool, Row, Type};
use tracing::debug;

use crate::config::GatewayConfig;

/// Query executor over a pooled MySQL connection.
#[derive(Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlExecutor {
    /// Wrap an existing pool.
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Create a lazily connecting pool from the gateway configuration.
    ///
    /// Connections are opened on first use, so startup does not depend on the
    /// database being reachable.
    pub fn connect_lazy(config: &GatewayConfig) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_max_connections)
            .acquire_timeout(config.pool_acquire_timeout)
            .connect_lazy(&config.database_url)
            .map_err(store_error)?;

        Ok(Self::new(pool, config.query_timeout))
    }

    /// Run `query` and decode every row with `decode`.
    async fn fetch<T>(
        &self,
        query: &BuiltQuery,
        decode: impl Fn(&MySqlRow) -> Result<T, StoreError>,
    ) -> Result<Vec<T>, StoreError> {
        let expanded = query.expand();
        debug!(sql = %expanded.sql, params = expanded.params.len(), "executing query");

        let statement = expanded
            .params
            .iter()
            .fold(sqlx::query(&expanded.sql), bind_value);

        let rows = tokio::time::timeout(self.query_timeout, statement.fetch_all(&self.pool))
            .await
            .map_err(|_| StoreError::Timeout)?
            .map_err(store_error)?;

        rows.iter().map(decode).collect()
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    async fn fetch_houses(&self, query: &BuiltQuery) -> Result<Vec<HouseRow>, StoreError> {
        self.fetch(query, |row| {
            Ok(HouseRow {
                house: column(row, "house")?,
            })
        })
        .await
    }

    async fn fetch_item_summaries(
        &self,
        query: &BuiltQuery,
    ) -> Result<Vec<ItemSummaryRow>, StoreError> {
        self.fetch(query, |row| {
            Ok(ItemSummaryRow {
                house: column(row, "house")?,
                item: column(row, "item")?,
                level: column(row, "level")?,
                price: column(row, "price")?,
                quantity: column(row, "quantity")?,
                lastseen: column(row, "lastseen")?,
            })
        })
        .await
    }

    async fn fetch_items(&self, query: &BuiltQuery) -> Result<Vec<ItemRow>, StoreError> {
        self.fetch(query, |row| {
            Ok(ItemRow {
                id: column(row, "id")?,
                name_enus: column(row, "name_enus")?,
                quality: column(row, "quality")?,
                level: column(row, "level")?,
                class: column(row, "class")?,
                subclass: column(row, "subclass")?,
                icon: column(row, "icon")?,
                stacksize: column(row, "stacksize")?,
                buyfromvendor: column(row, "buyfromvendor")?,
                selltovendor: column(row, "selltovendor")?,
                auctionable: column(row, "auctionable")?,
            })
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::timeout(self.query_timeout, sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map_err(|_| StoreError::Timeout)?
            .map(|_| ())
            .map_err(store_error)
    }
}

/// Bind one scalar parameter. Lists are flattened by [`BuiltQuery::expand`]
/// before binding; a list that survives is bound as its rendered text.
fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::Text(s) => query.bind(s.clone()),
        Value::List(_) => query.bind(value.render()),
    }
}

/// Decode a named column, reporting the column on failure.
fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, StoreError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name).map_err(|err| StoreError::Decode {
        column: name.to_string(),
        message: err.to_string(),
    })
}

fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
            StoreError::Connection(err.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}
