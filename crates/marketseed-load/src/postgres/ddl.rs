use sqlx::PgPool;
use tracing::info;

use marketseed_core::{AccountStatus, AdvertStatus, Advertiser, OfferStatus, Result, Role, SEED_ORDER};

use super::db_error;
use super::insert::quote_ident;

/// `CREATE TABLE IF NOT EXISTS` statements for every seeded table, parents first.
pub fn schema_statements() -> Vec<String> {
    vec![
        format!(
            r#"create table if not exists "users" (
    "id" varchar(255) primary key,
    "creation_timestamp" timestamp(6),
    "update_timestamp" timestamp(6),
    "active" varchar(255) {},
    "email" varchar(255) not null unique,
    "password" varchar(255),
    "role" varchar(255) {},
    "about_me" varchar(255),
    "address" varchar(255),
    "city" varchar(255),
    "country" varchar(255),
    "first_name" varchar(255),
    "last_name" varchar(255),
    "phone_number" varchar(255),
    "postal_code" varchar(255),
    "profile_picture" varchar(255),
    "username" varchar(255) not null unique
)"#,
            enum_check("active", AccountStatus::ALL.iter().map(|v| v.as_str())),
            enum_check("role", Role::ALL.iter().map(|v| v.as_str())),
        ),
        r#"create table if not exists "categories" (
    "id" varchar(255) primary key,
    "creation_timestamp" timestamp(6),
    "update_timestamp" timestamp(6),
    "description" varchar(255),
    "image_id" varchar(255),
    "name" varchar(255)
)"#
        .to_string(),
        r#"create table if not exists "jobs" (
    "id" varchar(255) primary key,
    "creation_timestamp" timestamp(6),
    "update_timestamp" timestamp(6),
    "description" varchar(255),
    "image_id" varchar(255),
    "name" varchar(255),
    "category_id" varchar(255) references "categories" ("id")
)"#
        .to_string(),
        r#"create table if not exists "job_keys" (
    "job_id" varchar(255) not null references "jobs" ("id"),
    "key" varchar(255)
)"#
        .to_string(),
        format!(
            r#"create table if not exists "adverts" (
    "id" varchar(255) primary key,
    "creation_timestamp" timestamp(6),
    "update_timestamp" timestamp(6),
    "advertiser" varchar(255) {},
    "delivery_time" integer not null,
    "description" varchar(255),
    "image_id" varchar(255),
    "name" varchar(255),
    "price" integer not null,
    "status" varchar(255) {},
    "user_id" varchar(255) not null references "users" ("id"),
    "job_id" varchar(255) references "jobs" ("id")
)"#,
            enum_check("advertiser", Advertiser::ALL.iter().map(|v| v.as_str())),
            enum_check("status", AdvertStatus::ALL.iter().map(|v| v.as_str())),
        ),
        format!(
            r#"create table if not exists "offers" (
    "id" varchar(255) primary key,
    "creation_timestamp" timestamp(6),
    "update_timestamp" timestamp(6),
    "offered_price" integer not null,
    "status" varchar(255) {},
    "user_id" varchar(255) not null references "users" ("id"),
    "advert_id" varchar(255) not null references "adverts" ("id")
)"#,
            enum_check("status", OfferStatus::ALL.iter().map(|v| v.as_str())),
        ),
        r#"create table if not exists "notifications" (
    "id" varchar(255) primary key,
    "creation_timestamp" timestamp(6),
    "message" varchar(255),
    "offer_id" varchar(255) references "offers" ("id"),
    "user_id" varchar(255) not null references "users" ("id")
)"#
        .to_string(),
    ]
}

/// Create any missing table in one transaction.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await.map_err(db_error)?;
    for statement in schema_statements() {
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
    }
    tx.commit().await.map_err(db_error)?;
    info!(tables = SEED_ORDER.len(), "schema ensured");
    Ok(())
}

/// Empty every seeded table with a single `TRUNCATE`.
///
/// No `CASCADE`: a table outside the seeded set that references one of them
/// makes this fail rather than silently losing its rows.
pub async fn reset_tables(pool: &PgPool) -> Result<()> {
    sqlx::query(&truncate_statement())
        .execute(pool)
        .await
        .map_err(db_error)?;
    info!(tables = SEED_ORDER.len(), "tables truncated");
    Ok(())
}

fn truncate_statement() -> String {
    let tables: Vec<String> = SEED_ORDER
        .iter()
        .rev()
        .map(|table| quote_ident(table.name))
        .collect();
    format!("truncate table {}", tables.join(", "))
}

fn enum_check<'a>(column: &str, values: impl Iterator<Item = &'a str>) -> String {
    let values: Vec<String> = values.map(|value| format!("'{value}'")).collect();
    format!(
        "check ({} in ({}))",
        quote_ident(column),
        values.join(", ")
    )
}
