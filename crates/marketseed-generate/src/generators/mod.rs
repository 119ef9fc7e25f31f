//! Row builders for each seeded table.
//!
//! Builders are pure: given an RNG, a timestamp and the parent ID pools they
//! return rows. Persisting them is the engine's job.

pub mod adverts;
pub mod categories;
pub mod jobs;
pub mod notifications;
pub mod offers;
pub mod password;
pub mod text;
pub mod unique;
pub mod users;

use std::ops::RangeInclusive;

use chrono::{Local, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Advert and offer prices.
pub const PRICE_RANGE: RangeInclusive<i32> = 50..=1000;
/// Advert delivery time in days.
pub const DELIVERY_DAYS: RangeInclusive<i32> = 1..=30;

/// Independent RNG stream for one table, derived from the run seed.
pub fn table_rng(seed: u64, table: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, table))
}

/// Random (v4) UUID drawn from `rng`, so seeded runs reproduce their IDs.
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Uniform pick from a fixed, non-empty set of enum values.
pub fn pick_variant<T: Copy, R: Rng + ?Sized>(values: &[T], rng: &mut R) -> T {
    values[rng.random_range(0..values.len())]
}

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
