use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};
use tracing::debug;

use marketseed_core::{ConnectionSettings, Error, Result};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub fn connect_options(settings: &ConnectionSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database)
}

/// Open the run's database handle.
///
/// A single direct connection is made first so an unreachable or refusing
/// server fails fast with its own error instead of a pool acquire timeout.
/// Seeding is sequential, so the pool holds a single connection; callers close
/// it with [`PgPool::close`] when the run ends.
pub async fn connect(settings: &ConnectionSettings) -> Result<PgPool> {
    let options = connect_options(settings);

    let probe = PgConnection::connect_with(&options)
        .await
        .map_err(|err| connect_error(settings, err))?;
    probe
        .close()
        .await
        .map_err(|err| connect_error(settings, err))?;
    debug!(host = %settings.host, port = settings.port, "database reachable");

    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|err| connect_error(settings, err))
}

fn connect_error(settings: &ConnectionSettings, err: sqlx::Error) -> Error {
    Error::Db(format!(
        "connecting to {}:{}/{}: {err}",
        settings.host, settings.port, settings.database
    ))
}
