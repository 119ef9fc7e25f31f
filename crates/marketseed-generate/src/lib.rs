//! Fixture generation engine for the marketplace schema.
//!
//! Builds fake users, categories, jobs, job keys, adverts, offers and
//! notifications in foreign-key order and streams them to a [`RowSink`]
//! through a threshold-flushing [`BatchWriter`].
//!
//! [`RowSink`]: marketseed_core::RowSink

pub mod batch;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod memory;
pub mod model;
pub mod progress;

pub use batch::{BatchSummary, BatchWriter, FlushPolicy};
pub use engine::SeedEngine;
pub use errors::GenerationError;
pub use memory::{MemorySink, StoredTable};
pub use model::{DEFAULT_FLUSH_THRESHOLD, SeedCounts, SeedOptions, SeedReport, TableReport};
