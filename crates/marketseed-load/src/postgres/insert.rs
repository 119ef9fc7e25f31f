use sqlx::{Postgres, QueryBuilder};

use marketseed_core::{FieldValue, TableSpec};

/// PostgreSQL's limit on bind parameters in one statement.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Rows that fit in one `INSERT` without exceeding [`MAX_BIND_PARAMS`].
pub fn rows_per_statement(table: &TableSpec) -> usize {
    (MAX_BIND_PARAMS / table.columns.len().max(1)).max(1)
}

pub fn insert_prefix(table: &TableSpec) -> String {
    let columns: Vec<String> = table.columns.iter().map(|name| quote_ident(name)).collect();
    format!(
        "INSERT INTO {} ({}) ",
        quote_ident(table.name),
        columns.join(", ")
    )
}

/// Multi-row `INSERT ... VALUES` for `rows`, with every value bound.
pub fn insert_builder(table: &TableSpec, rows: &[Vec<FieldValue>]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(insert_prefix(table));
    builder.push_values(rows, |mut tuple, row| {
        for value in row {
            match value {
                FieldValue::Null => {
                    tuple.push_bind(None::<String>);
                }
                FieldValue::Int(value) => {
                    tuple.push_bind(*value);
                }
                FieldValue::Text(value) => {
                    tuple.push_bind(value.clone());
                }
                // ids are stored as varchar
                FieldValue::Uuid(value) => {
                    tuple.push_bind(value.to_string());
                }
                FieldValue::Timestamp(value) => {
                    tuple.push_bind(*value);
                }
            }
        }
    });
    builder
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use marketseed_core::table::{JOB_KEYS, USERS};

    use super::*;

    #[test]
    fn chunks_respect_bind_limit() {
        assert_eq!(rows_per_statement(&USERS), 65_535 / 17);
        assert_eq!(rows_per_statement(&JOB_KEYS), 32_767);
        assert!(rows_per_statement(&USERS) * USERS.columns.len() <= MAX_BIND_PARAMS);
    }

    #[test]
    fn prefix_quotes_identifiers() {
        assert_eq!(
            insert_prefix(&JOB_KEYS),
            r#"INSERT INTO "job_keys" ("job_id", "key") "#
        );
        assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
    }

    #[test]
    fn builder_binds_every_value() {
        let rows = vec![
            vec![FieldValue::Null, FieldValue::Text("rust".to_string())],
            vec![FieldValue::Null, FieldValue::Text("sql".to_string())],
        ];
        let builder = insert_builder(&JOB_KEYS, &rows);
        assert_eq!(
            builder.sql(),
            r#"INSERT INTO "job_keys" ("job_id", "key") VALUES ($1, $2), ($3, $4)"#
        );
    }
}
