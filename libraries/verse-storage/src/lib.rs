//! Verse Storage
//!
//! SQLite persistence layer for the Verse playlist engine.
//!
//! The engine maintains two hard consistency guarantees across every
//! committed mutation:
//!
//! - cached aggregates (`song_count`, `total_duration_seconds`) match the
//!   membership rows exactly, and
//! - membership positions form a dense 1..N sequence with relative order
//!   preserved across removals.
//!
//! Every multi-write operation runs inside a single transaction; concurrent
//! mutators of the same playlist serialize on SQLite's write lock, with the
//! pool's busy timeout bounding the wait.
//!
//! # Example
//!
//! ```rust,no_run
//! use verse_core::types::CreatePlaylist;
//! use verse_storage::{create_pool, run_migrations, DbSongCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://verse.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = DbSongCatalog::new(pool.clone());
//!
//! let playlist = verse_storage::playlists::create(
//!     &pool,
//!     CreatePlaylist {
//!         owner_id: 1,
//!         name: "Road Trip".to_string(),
//!         description: None,
//!         is_public: true,
//!     },
//! )
//! .await?;
//!
//! verse_storage::playlists::add_song(&pool, &catalog, playlist.id, 42).await?;
//! # Ok(())
//! # }
//! ```

// Vertical slices
pub mod browse;
pub mod catalog;
pub mod playlists;

pub use catalog::DbSongCatalog;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at application startup to bring the schema up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// WAL journal mode keeps readers unblocked while a writer commits; the busy
/// timeout is the bounded wait behind the engine's `Busy` error; foreign key
/// enforcement carries the membership cascade on playlist deletion.
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("Pool created");

    Ok(pool)
}
