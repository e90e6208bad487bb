//! Query construction and memoization.
//!
//! This module turns declarative field mappings plus request parameters into
//! parameterized statements, fingerprints them and caches repeated lookups.

mod builder;
mod cache;
mod fingerprint;
mod mapping;
mod normalize;
mod params;

pub use builder::{build, BuiltQuery, Condition};
pub use cache::{CacheConfig, CacheStats, LookupCache};
pub use fingerprint::{rolling_hash, Fingerprint};
pub use mapping::{FieldMapping, MappingSet, MatchKind};
pub use normalize::normalize;
pub use params::RequestParams;
