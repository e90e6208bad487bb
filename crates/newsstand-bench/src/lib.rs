//! Newsstand Benchmark Suite
//!
//! Criterion benchmarks for the query core.
//!
//! # Benchmark Categories
//!
//! - **Builder**: condition building, membership normalization, expansion
//! - **Cache**: fingerprinting, lookup cache hits versus misses

pub mod fixtures;
pub mod harness;

pub use fixtures::{generate_house_ids, generate_realm_params, Scale};
pub use harness::StaticExecutor;
