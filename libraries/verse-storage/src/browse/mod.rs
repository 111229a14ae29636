//! Read-side playlist listing and search
//!
//! Projections trust the cached aggregates maintained by the engine slice;
//! nothing here recomputes `song_count` or `total_duration_seconds`.
//! `owner_id` is an opaque reference the engine never validates, so the
//! username join is a LEFT JOIN: a playlist whose owner has no directory row
//! still lists, with no username attached.

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use verse_core::error::{Result, VerseError};
use verse_core::types::*;

/// List a user's playlists, newest first
pub async fn list_by_owner(pool: &SqlitePool, owner_id: UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT p.playlist_id, p.owner_id, p.name, p.description, p.is_public,
               p.created_at, p.song_count, p.total_duration_seconds, u.username
        FROM playlists p
        LEFT JOIN users u ON p.owner_id = u.user_id
        WHERE p.owner_id = ?
        ORDER BY p.created_at DESC, p.playlist_id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    debug!("Retrieved {} playlists for owner {}", rows.len(), owner_id);
    rows.iter().map(playlist_from_row).collect()
}

/// List all public playlists, newest first
pub async fn list_public(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT p.playlist_id, p.owner_id, p.name, p.description, p.is_public,
               p.created_at, p.song_count, p.total_duration_seconds, u.username
        FROM playlists p
        LEFT JOIN users u ON p.owner_id = u.user_id
        WHERE p.is_public = 1
        ORDER BY p.created_at DESC, p.playlist_id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    debug!("Retrieved {} public playlists", rows.len());
    rows.iter().map(playlist_from_row).collect()
}

/// Search public playlists by name, description, or owner username
///
/// Case-insensitive substring match; blank keywords are rejected before any
/// query runs.
pub async fn search(pool: &SqlitePool, keyword: &str) -> Result<Vec<Playlist>> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(VerseError::invalid_input("Search keyword is required"));
    }

    let pattern = format!("%{}%", keyword);

    let rows = sqlx::query(
        r#"
        SELECT p.playlist_id, p.owner_id, p.name, p.description, p.is_public,
               p.created_at, p.song_count, p.total_duration_seconds, u.username
        FROM playlists p
        LEFT JOIN users u ON p.owner_id = u.user_id
        WHERE (p.name LIKE ? OR p.description LIKE ? OR u.username LIKE ?)
          AND p.is_public = 1
        ORDER BY p.created_at DESC, p.playlist_id DESC
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    debug!("Found {} playlists matching '{}'", rows.len(), keyword);
    rows.iter().map(playlist_from_row).collect()
}

fn playlist_from_row(row: &SqliteRow) -> Result<Playlist> {
    Ok(Playlist {
        id: row.get("playlist_id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        description: row.get("description"),
        is_public: row.get::<i64, _>("is_public") != 0,
        created_at: DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| VerseError::storage("Invalid timestamp"))?,
        song_count: row.get("song_count"),
        total_duration_seconds: row.get("total_duration_seconds"),
        owner_username: row.get::<Option<String>, _>("username"),
    })
}
