//! Newsstand Core - query building, lookup caching and market lookups.
//!
//! This crate turns declarative field mappings plus request parameters into
//! parameterized SQL, memoizes the realm-to-house lookup that precedes every
//! price query, and exposes the read-only market lookups over a pluggable
//! [`QueryExecutor`].

pub mod error;
pub mod executor;
pub mod market;
pub mod query;
pub mod row;
pub mod value;

pub use error::{Error, MappingError, Result, StoreError};
pub use executor::QueryExecutor;
pub use market::MarketService;
pub use query::{
    build, BuiltQuery, CacheConfig, CacheStats, FieldMapping, Fingerprint, LookupCache,
    MappingSet, MatchKind, RequestParams,
};
pub use row::{HouseRow, ItemRow, ItemSummaryRow};
pub use value::Value;
