use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use marketseed_core::{Error, FieldValue, Result, RowSink, TableSpec};

mod ddl;
mod insert;
mod queries;

pub use ddl::{create_schema, reset_tables, schema_statements};
pub use insert::{MAX_BIND_PARAMS, insert_builder, insert_prefix, rows_per_statement};
pub use queries::{count_rows, fetch_database_name};

/// Sink writing batches to PostgreSQL.
///
/// Each batch runs in its own transaction: multi-row inserts sized to stay
/// under the bind-parameter limit, then one commit. A failing statement
/// rolls the whole batch back when the transaction is dropped.
#[derive(Debug, Clone)]
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    /// Create a new sink using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RowSink for PostgresSink {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn write_batch(
        &mut self,
        table: &'static TableSpec,
        rows: Vec<Vec<FieldValue>>,
    ) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut written = 0;
        let chunk_rows = rows_per_statement(table);

        for chunk in rows.chunks(chunk_rows) {
            let mut builder = insert_builder(table, chunk);
            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            written += result.rows_affected();
        }

        tx.commit().await.map_err(db_error)?;
        debug!(table = table.name, rows = written, "transaction committed");
        Ok(written)
    }
}

pub(crate) fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}
