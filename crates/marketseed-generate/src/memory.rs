use std::collections::BTreeMap;

use async_trait::async_trait;
use uuid::Uuid;

use marketseed_core::{Error, FieldValue, Result, RowSink, TableSpec};

/// Rows and commit counts captured for one table.
#[derive(Debug, Clone, Default)]
pub struct StoredTable {
    pub rows: Vec<Vec<FieldValue>>,
    pub rows_written: u64,
    pub commits: u64,
}

/// Sink that keeps batches in memory.
///
/// Used for dry runs and to check generated data without a database.
#[derive(Debug)]
pub struct MemorySink {
    tables: BTreeMap<&'static str, StoredTable>,
    specs: BTreeMap<&'static str, &'static TableSpec>,
    retain_rows: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            specs: BTreeMap::new(),
            retain_rows: true,
        }
    }

    /// Count rows and commits without keeping the rows.
    pub fn discarding() -> Self {
        Self {
            retain_rows: false,
            ..Self::new()
        }
    }

    pub fn table(&self, name: &str) -> Option<&StoredTable> {
        self.tables.get(name)
    }

    pub fn row_count(&self, name: &str) -> u64 {
        self.table(name).map(|table| table.rows_written).unwrap_or(0)
    }

    pub fn commits(&self, name: &str) -> u64 {
        self.table(name).map(|table| table.commits).unwrap_or(0)
    }

    /// Values stored for `column` of `table`, in insertion order.
    pub fn column(&self, table: &str, column: &str) -> Vec<&FieldValue> {
        let Some(spec) = self.specs.get(table) else {
            return Vec::new();
        };
        let Some(index) = spec.column_index(column) else {
            return Vec::new();
        };
        self.table(table)
            .map(|stored| stored.rows.iter().filter_map(|row| row.get(index)).collect())
            .unwrap_or_default()
    }

    /// UUID values stored for `column` of `table`.
    pub fn uuids(&self, table: &str, column: &str) -> Vec<Uuid> {
        self.column(table, column)
            .into_iter()
            .filter_map(FieldValue::as_uuid)
            .collect()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowSink for MemorySink {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn write_batch(
        &mut self,
        table: &'static TableSpec,
        rows: Vec<Vec<FieldValue>>,
    ) -> Result<u64> {
        if let Some(row) = rows.iter().find(|row| row.len() != table.columns.len()) {
            return Err(Error::Other(format!(
                "row for '{}' has {} values, expected {}",
                table.name,
                row.len(),
                table.columns.len()
            )));
        }

        let written = rows.len() as u64;
        self.specs.insert(table.name, table);
        let stored = self.tables.entry(table.name).or_default();
        stored.rows_written += written;
        stored.commits += 1;
        if self.retain_rows {
            stored.rows.extend(rows);
        }
        Ok(written)
    }
}
