//! SQL-backed song catalog
//!
//! Implements the [`SongCatalog`] seam over the `songs` table. Query
//! failures here are infrastructure failures of the catalog, not data
//! errors, so they surface as `CatalogUnavailable` and callers may retry.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use verse_core::error::{Result, VerseError};
use verse_core::types::{CatalogSong, SongId};
use verse_core::SongCatalog;

/// Look up a song summary by ID
pub async fn get_by_id(pool: &SqlitePool, song_id: SongId) -> Result<Option<CatalogSong>> {
    let row = sqlx::query("SELECT song_id, duration_seconds, is_active FROM songs WHERE song_id = ?")
        .bind(song_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| VerseError::catalog_unavailable(e.to_string()))?;

    Ok(row.map(|row| CatalogSong {
        song_id: row.get("song_id"),
        duration_seconds: row.get("duration_seconds"),
        is_active: row.get::<i64, _>("is_active") != 0,
    }))
}

/// Song catalog backed by the shared database
#[derive(Clone)]
pub struct DbSongCatalog {
    pool: SqlitePool,
}

impl DbSongCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongCatalog for DbSongCatalog {
    async fn exists(&self, song_id: SongId) -> Result<bool> {
        Ok(get_by_id(&self.pool, song_id).await?.is_some())
    }

    async fn is_active(&self, song_id: SongId) -> Result<bool> {
        Ok(get_by_id(&self.pool, song_id)
            .await?
            .is_some_and(|song| song.is_active))
    }

    async fn duration_seconds(&self, song_id: SongId) -> Result<Option<i64>> {
        Ok(get_by_id(&self.pool, song_id)
            .await?
            .map(|song| song.duration_seconds))
    }
}
