use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{PgPool, postgres::PgPoolOptions};

use marketseed_core::table::{ADVERTS, CATEGORIES, JOB_KEYS, JOBS, NOTIFICATIONS, OFFERS, USERS};
use marketseed_core::{FieldValue, RowSink, SEED_ORDER};
use marketseed_generate::{SeedCounts, SeedEngine, SeedOptions};
use marketseed_load::{PostgresSink, count_rows, create_schema, reset_tables};

fn database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .ok()
}

async fn prepared_pool() -> Result<Option<PgPool>> {
    let Some(db_url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL or DATABASE_URL for integration tests");
        return Ok(None);
    };
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&db_url)
        .await
        .context("connecting to Postgres")?;

    create_schema(&pool).await.context("creating schema")?;
    reset_tables(&pool).await.context("truncating tables")?;
    Ok(Some(pool))
}

// Both tests truncate the same tables, so they share one body.
#[tokio::test]
async fn seeds_scenario_and_rolls_back_failed_batches() -> Result<()> {
    let Some(pool) = prepared_pool().await? else {
        return Ok(());
    };

    seeds_small_scenario(&pool).await?;
    failed_batch_leaves_no_rows(&pool).await?;

    pool.close().await;
    Ok(())
}

async fn seeds_small_scenario(pool: &PgPool) -> Result<()> {
    let options = SeedOptions {
        counts: SeedCounts {
            users: 5,
            categories: 3,
            jobs: 10,
            keys_per_job: 2,
            adverts: 10,
            offers: 10,
            notifications: 10,
        },
        flush_threshold: 4,
        seed: Some(99),
        ..SeedOptions::default()
    };
    let engine = SeedEngine::new(options)?;
    let mut sink = PostgresSink::new(pool.clone());
    let report = engine.run("integration", &mut sink).await?;
    assert_eq!(report.engine, "postgres");

    for (table, expected) in [
        (&USERS, 5),
        (&CATEGORIES, 3),
        (&JOBS, 10),
        (&ADVERTS, 10),
        (&OFFERS, 10),
        (&NOTIFICATIONS, 10),
    ] {
        assert_eq!(count_rows(pool, table).await?, expected, "rows in {}", table.name);
    }
    let job_keys = count_rows(pool, &JOB_KEYS).await?;
    assert!((10..=20).contains(&job_keys), "job_keys = {job_keys}");

    for table in SEED_ORDER {
        let rows = count_rows(pool, table).await?;
        let reported = report
            .table(table.name)
            .with_context(|| format!("{} missing from report", table.name))?;
        assert_eq!(rows as u64, reported.rows_written, "reported rows in {}", table.name);
    }

    let orphans: i64 = sqlx::query_scalar(
        "select count(*) from adverts a left join jobs j on j.id = a.job_id where j.id is null",
    )
    .fetch_one(pool)
    .await
    .context("checking advert foreign keys")?;
    assert_eq!(orphans, 0);

    Ok(())
}

async fn failed_batch_leaves_no_rows(pool: &PgPool) -> Result<()> {
    let before = count_rows(pool, &JOB_KEYS).await?;
    let mut sink = PostgresSink::new(pool.clone());

    // the second row points at a job that does not exist
    let rows = vec![
        vec![
            FieldValue::Uuid(existing_job(pool).await?),
            FieldValue::Text("kept-only-on-commit".to_string()),
        ],
        vec![
            FieldValue::Text("missing-job".to_string()),
            FieldValue::Text("orphan".to_string()),
        ],
    ];
    let result = sink.write_batch(&JOB_KEYS, rows).await;
    assert!(matches!(result, Err(marketseed_core::Error::Db(_))));

    assert_eq!(count_rows(pool, &JOB_KEYS).await?, before);
    Ok(())
}

async fn existing_job(pool: &PgPool) -> Result<uuid::Uuid> {
    let id: String = sqlx::query_scalar("select id from jobs limit 1")
        .fetch_one(pool)
        .await
        .context("fetching a job id")?;
    uuid::Uuid::parse_str(&id).context("job ids are uuids")
}
