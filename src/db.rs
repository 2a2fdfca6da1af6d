//! Database - Creazione del pool, schema e reset dei dati
//!
//! Nessuno stato globale: il pool viene creato a partire dalla `Config` e passato
//! esplicitamente ad `AppState` (e quindi ai repository).

use crate::core::Config;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Error, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const MEMORY_URL: &str = "sqlite::memory:";

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apre il pool verso `config.database_url`.
///
/// Un database in memoria esiste solo finché vive la sua connessione, quindi in quel caso
/// il pool è limitato a una sola connessione che non viene mai riciclata.
#[instrument(skip(config))]
pub async fn connect(config: &Config) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_memory_url(&config.database_url) {
        debug!("Using in-memory database");
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?
    };

    info!("Database pool ready");
    Ok(pool)
}

/// Pool in memoria con lo schema già creato
pub async fn connect_in_memory() -> Result<SqlitePool, Error> {
    let pool = connect(&Config::for_tests(MEMORY_URL)).await?;
    create_all(&pool).await?;
    Ok(pool)
}

/// Crea le tabelle `users`, `messages`, `follows`. Idempotente.
pub async fn create_all(pool: &SqlitePool) -> Result<(), Error> {
    MIGRATOR.run(pool).await?;
    debug!("Schema up to date");
    Ok(())
}

/// Cancella tutte le righe delle tre tabelle, in ordine compatibile con le foreign key.
pub async fn reset(pool: &SqlitePool) -> Result<(), Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM follows").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM messages").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
    tx.commit().await?;
    debug!("All rows deleted");
    Ok(())
}

fn is_memory_url(url: &str) -> bool {
    url == MEMORY_URL || url.contains(":memory:") || url.contains("mode=memory")
}
