use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Rows buffered before a commit on the large tables.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 10_000;

/// Requested row counts per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCounts {
    pub users: u64,
    pub categories: u64,
    pub jobs: u64,
    /// Upper bound of keys attached to each job; every job gets at least one.
    pub keys_per_job: u32,
    pub adverts: u64,
    pub offers: u64,
    pub notifications: u64,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            users: 100,
            categories: 300,
            jobs: 1000,
            keys_per_job: 5,
            adverts: 1000,
            offers: 100,
            notifications: 100,
        }
    }
}

/// Options for the seeding engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOptions {
    pub counts: SeedCounts,
    /// Rows buffered before a commit on jobs, job keys, adverts, offers and notifications.
    pub flush_threshold: usize,
    /// RNG seed. A fresh one is drawn per run when absent.
    pub seed: Option<u64>,
    /// Draw per-table progress bars on stderr.
    pub show_progress: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            counts: SeedCounts::default(),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            seed: None,
            show_progress: false,
        }
    }
}

impl SeedOptions {
    /// Reject option sets that would need a foreign key from an empty parent pool.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let counts = &self.counts;

        if self.flush_threshold == 0 {
            return Err(GenerationError::InvalidOptions(
                "flush threshold must be at least 1".to_string(),
            ));
        }
        if counts.keys_per_job == 0 {
            return Err(GenerationError::InvalidOptions(
                "keys per job must be at least 1".to_string(),
            ));
        }

        require("jobs", counts.jobs, &[("categories", counts.categories)])?;
        require(
            "adverts",
            counts.adverts,
            &[("users", counts.users), ("jobs", counts.jobs)],
        )?;
        require(
            "offers",
            counts.offers,
            &[("users", counts.users), ("adverts", counts.adverts)],
        )?;
        require(
            "notifications",
            counts.notifications,
            &[("offers", counts.offers), ("users", counts.users)],
        )?;

        Ok(())
    }
}

fn require(child: &str, rows: u64, parents: &[(&str, u64)]) -> Result<(), GenerationError> {
    if rows == 0 {
        return Ok(());
    }
    match parents.iter().find(|(_, parent_rows)| *parent_rows == 0) {
        Some((parent, _)) => Err(GenerationError::InvalidOptions(format!(
            "{child} require at least one row in {parent}"
        ))),
        None => Ok(()),
    }
}

/// Summary of a seeded table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    /// `None` for tables whose size is derived from their parent (job keys).
    pub rows_requested: Option<u64>,
    pub rows_written: u64,
    pub commits: u64,
    pub duration_ms: u64,
}

/// Report for a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub run_id: String,
    pub seed: u64,
    pub engine: String,
    pub tables: Vec<TableReport>,
    pub rows_total: u64,
    pub duration_ms: u64,
}

impl SeedReport {
    pub fn new(run_id: String, seed: u64, engine: &str) -> Self {
        Self {
            run_id,
            seed,
            engine: engine.to_string(),
            tables: Vec::new(),
            rows_total: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: TableReport) {
        self.rows_total += table.rows_written;
        self.tables.push(table);
    }

    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|table| table.table == name)
    }
}
