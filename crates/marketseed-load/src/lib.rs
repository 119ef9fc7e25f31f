//! PostgreSQL loading for marketseed.

pub mod options;
pub mod postgres;

pub use options::{connect, connect_options};
pub use postgres::{
    PostgresSink, count_rows, create_schema, fetch_database_name, reset_tables, schema_statements,
};
