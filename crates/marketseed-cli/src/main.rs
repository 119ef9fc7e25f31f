mod registry;

use std::path::PathBuf;

use clap::{Args, Parser};
use marketseed_core::connection::{
    DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER,
};
use marketseed_core::{ConnectionSettings, Error as CoreError};
use marketseed_generate::{
    DEFAULT_FLUSH_THRESHOLD, GenerationError, MemorySink, SeedCounts, SeedEngine, SeedOptions,
    SeedReport,
};
use marketseed_load::{PostgresSink, connect, create_schema, fetch_database_name, reset_tables};
use registry::{RunContext, init_logging, start_run, write_report};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
}

#[derive(Parser, Debug)]
#[command(
    name = "marketseed",
    version,
    about = "Seed the marketplace tables with fixture data"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    counts: CountArgs,
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Database host.
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    /// Database port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Database user.
    #[arg(long, default_value = DEFAULT_USER)]
    user: String,
    /// Database password.
    #[arg(long, default_value = DEFAULT_PASSWORD, hide_default_value = true)]
    password: String,
    /// Database name.
    #[arg(long, default_value = DEFAULT_DATABASE)]
    database: String,
}

#[derive(Args, Debug)]
struct CountArgs {
    /// User rows.
    #[arg(long, default_value_t = SeedCounts::default().users)]
    users: u64,
    /// Category rows.
    #[arg(long, default_value_t = SeedCounts::default().categories)]
    categories: u64,
    /// Job rows.
    #[arg(long, default_value_t = SeedCounts::default().jobs)]
    jobs: u64,
    /// Maximum keys attached to each job.
    #[arg(long, default_value_t = SeedCounts::default().keys_per_job)]
    keys_per_job: u32,
    /// Advert rows.
    #[arg(long, default_value_t = SeedCounts::default().adverts)]
    adverts: u64,
    /// Offer rows.
    #[arg(long, default_value_t = SeedCounts::default().offers)]
    offers: u64,
    /// Notification rows.
    #[arg(long, default_value_t = SeedCounts::default().notifications)]
    notifications: u64,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Rows buffered before each commit on the large tables.
    #[arg(long, default_value_t = DEFAULT_FLUSH_THRESHOLD)]
    flush_every: usize,
    /// RNG seed; the same seed reproduces IDs and fake values.
    #[arg(long)]
    seed: Option<u64>,
    /// Create the tables if they do not exist.
    #[arg(long, default_value_t = false)]
    create_schema: bool,
    /// Truncate the tables before seeding.
    #[arg(long, default_value_t = false)]
    reset: bool,
    /// Generate rows without touching a database.
    #[arg(long, default_value_t = false, conflicts_with_all = ["create_schema", "reset"])]
    dry_run: bool,
    /// Hide per-table progress bars.
    #[arg(long, default_value_t = false)]
    no_progress: bool,
    /// Write config, logs and report under this directory.
    #[arg(long, value_name = "DIR")]
    run_dir: Option<PathBuf>,
}

impl From<ConnectionArgs> for ConnectionSettings {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            database: args.database,
        }
    }
}

impl Cli {
    fn seed_options(&self) -> SeedOptions {
        let counts = &self.counts;
        SeedOptions {
            counts: SeedCounts {
                users: counts.users,
                categories: counts.categories,
                jobs: counts.jobs,
                keys_per_job: counts.keys_per_job,
                adverts: counts.adverts,
                offers: counts.offers,
                notifications: counts.notifications,
            },
            flush_threshold: self.run.flush_every,
            seed: self.run.seed,
            show_progress: !self.run.no_progress,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    run_seed(cli).await
}

async fn run_seed(cli: Cli) -> Result<(), CliError> {
    let options = cli.seed_options();
    let Cli {
        connection, run, ..
    } = cli;
    let settings = ConnectionSettings::from(connection);
    let connection = settings.redact();

    let run_id = Uuid::new_v4().to_string();
    let run_paths = match &run.run_dir {
        Some(run_dir) => Some(start_run(&RunContext {
            run_id: run_id.clone(),
            started_at: chrono::Utc::now(),
            run_dir: run_dir.clone(),
            dry_run: run.dry_run,
            create_schema: run.create_schema,
            reset: run.reset,
            options: options.clone(),
            connection: connection.clone(),
        })?),
        None => None,
    };
    init_logging(run_paths.as_ref().map(|paths| paths.logs_path.as_path()))?;

    info!(
        run_id = %run_id,
        connection = %connection.redacted,
        dry_run = run.dry_run,
        "run started"
    );

    // options are checked before any connection is opened
    let engine = SeedEngine::new(options)?;

    let report = if run.dry_run {
        let mut sink = MemorySink::discarding();
        engine.run(&run_id, &mut sink).await?
    } else {
        let pool = connect(&settings).await?;
        let outcome = seed_database(&pool, &engine, &run_id, &run).await;
        pool.close().await;
        outcome?
    };

    if let Some(paths) = &run_paths {
        write_report(paths, &report)?;
        info!(path = %paths.report_path.display(), "report written");
    }

    println!(
        "Data generation completed: {} rows in {} tables ({} ms, seed {})",
        report.rows_total,
        report.tables.len(),
        report.duration_ms,
        report.seed
    );

    Ok(())
}

async fn seed_database(
    pool: &PgPool,
    engine: &SeedEngine,
    run_id: &str,
    run: &RunArgs,
) -> Result<SeedReport, CliError> {
    let database = fetch_database_name(pool).await?;
    info!(database = %database, "connected");

    if run.create_schema {
        create_schema(pool).await?;
    }
    if run.reset {
        reset_tables(pool).await?;
    }

    let mut sink = PostgresSink::new(pool.clone());
    Ok(engine.run(run_id, &mut sink).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixture_profile() {
        let cli = Cli::try_parse_from(["marketseed"]).expect("parse defaults");
        let settings = ConnectionSettings::from(cli.connection);
        assert_eq!(settings, ConnectionSettings::default());
        assert_eq!(cli.counts.users, 100);
        assert_eq!(cli.counts.categories, 300);
        assert_eq!(cli.counts.jobs, 1000);
        assert_eq!(cli.counts.keys_per_job, 5);
        assert_eq!(cli.counts.adverts, 1000);
        assert_eq!(cli.run.flush_every, 10_000);
        assert!(cli.run.seed.is_none());
        assert!(cli.run.run_dir.is_none());
    }

    #[test]
    fn flags_map_onto_seed_options() {
        let cli = Cli::try_parse_from([
            "marketseed",
            "--users",
            "5",
            "--keys-per-job",
            "2",
            "--flush-every",
            "10",
            "--seed",
            "42",
            "--no-progress",
        ])
        .expect("parse flags");
        let options = cli.seed_options();
        assert_eq!(options.counts.users, 5);
        assert_eq!(options.counts.keys_per_job, 2);
        assert_eq!(options.flush_threshold, 10);
        assert_eq!(options.seed, Some(42));
        assert!(!options.show_progress);
    }

    #[test]
    fn dry_run_conflicts_with_database_flags() {
        assert!(Cli::try_parse_from(["marketseed", "--dry-run", "--reset"]).is_err());
        assert!(Cli::try_parse_from(["marketseed", "--dry-run"]).is_ok());
    }
}
