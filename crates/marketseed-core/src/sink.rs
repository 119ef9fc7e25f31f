use async_trait::async_trait;

use crate::model::FieldValue;
use crate::table::TableSpec;
use crate::Result;

/// Destination for flushed row batches.
///
/// Each call is one unit of commit: an implementation either persists every
/// row of the batch or returns an error and persists none of them.
#[async_trait]
pub trait RowSink: Send {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Persist and commit `rows`, each holding one value per `table.columns` entry.
    /// Returns the number of rows written.
    async fn write_batch(
        &mut self,
        table: &'static TableSpec,
        rows: Vec<Vec<FieldValue>>,
    ) -> Result<u64>;
}
