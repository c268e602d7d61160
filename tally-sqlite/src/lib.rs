#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// SQLite database implementation of the receipt repository.
///
/// Holds separate reader and writer connection pools. SQLite serializes
/// writes anyway, so the writer pool is capped at a single connection and
/// reads fan out over their own pool, which is the arrangement WAL mode is
/// designed for.
///
/// # Example
///
/// ```no_run
/// # use tally_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

// The default database is a named in-memory database with a shared cache,
// so the reader and writer pools observe the same data. A plain `:memory:`
// database would give every pooled connection its own private copy.
const MEMORY_URL: &str = "file:tally?mode=memory&cache=shared";

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates the database file if missing (when `create_if_missing` is
    /// set) and applies any pending migrations before returning.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established or a
    /// migration fails to apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options = sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(MEMORY_URL))?
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .journal_mode(sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlite::SqliteSynchronous::Normal)
            .pragma("journal_size_limit", "27103364")
            .pragma("mmap_size", "134217728")
            .pragma("temp_store", "memory")
            .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        // min_connections(1) keeps the writer's connection alive, which for
        // the in-memory database is what keeps the database itself alive.
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        // Run any pending migrations before returning
        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}
