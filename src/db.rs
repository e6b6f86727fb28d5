use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the pool, tunes SQLite, and brings the schema up to date.
///
/// Pragmas go through the connect options so every pooled connection gets them.
pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(max_connections.max(1)).sqlx_logging(false).map_sqlx_sqlite_opts(
        |sqlite| {
            sqlite
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .busy_timeout(BUSY_TIMEOUT)
        },
    );

    let db = Database::connect(opts).await?;

    Migrator::up(&db, None).await?;
    tracing::debug!(database_url, "schema up to date");

    Ok(db)
}
