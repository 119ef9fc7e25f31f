use sqlx::PgPool;

use marketseed_core::{Result, TableSpec};

use super::db_error;
use super::insert::quote_ident;

pub async fn fetch_database_name(pool: &PgPool) -> Result<String> {
    let name = sqlx::query_scalar::<_, String>("select current_database()")
        .fetch_one(pool)
        .await
        .map_err(db_error)?;
    Ok(name)
}

/// Total rows currently in `table`.
pub async fn count_rows(pool: &PgPool, table: &TableSpec) -> Result<i64> {
    let sql = format!("select count(*) from {}", quote_ident(table.name));
    let count = sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(pool)
        .await
        .map_err(db_error)?;
    Ok(count)
}
