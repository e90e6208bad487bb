//! Test data generation for benchmarks.
//!
//! Generators are seeded so runs are reproducible.

use newsstand_core::{RequestParams, Value};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scale factor for benchmark data generation.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    /// A single realm's houses.
    Tiny,
    /// One region.
    Small,
    /// Every house of every region, with duplicates.
    Large,
}

impl Scale {
    /// Number of house ids to generate.
    pub fn count(&self) -> usize {
        match self {
            Scale::Tiny => 4,
            Scale::Small => 250,
            Scale::Large => 5_000,
        }
    }
}

/// House ids with roughly one duplicate in four and occasional nulls.
pub fn generate_house_ids(scale: Scale) -> Value {
    let mut rng = StdRng::seed_from_u64(42);
    let count = scale.count();
    let distinct = (count * 3 / 4).max(1) as i64;

    Value::List(
        (0..count)
            .map(|_| {
                if rng.gen_ratio(1, 50) {
                    Value::Null
                } else {
                    Value::Int(rng.gen_range(1..=distinct))
                }
            })
            .collect(),
    )
}

/// `count` distinct region/realm lookups.
pub fn generate_realm_params(count: usize) -> Vec<RequestParams> {
    let mut rng = StdRng::seed_from_u64(7);

    (0..count)
        .map(|i| {
            let slug: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(12)
                .map(char::from)
                .collect();
            RequestParams::new()
                .with("region", if i % 2 == 0 { "eu" } else { "us" })
                .with("realm", slug.to_lowercase())
        })
        .collect()
}
