//! Playlist engine vertical slice
//!
//! Header CRUD plus the atomic membership mutations. Invariants enforced
//! here, after every committed operation:
//!
//! - `song_count` equals the number of membership rows
//! - `total_duration_seconds` equals the sum of member durations captured at
//!   add-time
//! - positions are exactly 1..song_count, relative order preserved across
//!   removals
//! - a song appears at most once per playlist
//!
//! Each mutating operation either fully applies or has no visible effect:
//! dependent writes share one transaction, and dropping an uncommitted
//! transaction rolls everything back.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use verse_core::error::{Result, VerseError};
use verse_core::types::*;
use verse_core::SongCatalog;

/// Create a new playlist with empty membership and zeroed aggregates
pub async fn create(pool: &SqlitePool, input: CreatePlaylist) -> Result<Playlist> {
    let name = input.validated_name()?;
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (owner_id, name, description, is_public, created_at, song_count, total_duration_seconds)
        VALUES (?, ?, ?, ?, ?, 0, 0)
        "#,
    )
    .bind(input.owner_id)
    .bind(&name)
    .bind(&input.description)
    .bind(input.is_public)
    .bind(created_at.timestamp())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    info!("Created playlist {} for owner {}", id, input.owner_id);

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| VerseError::storage("Failed to retrieve created playlist"))
}

/// Get a playlist header by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        r#"
        SELECT playlist_id, owner_id, name, description, is_public, created_at,
               song_count, total_duration_seconds
        FROM playlists
        WHERE playlist_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(|row| playlist_from_row(&row)).transpose()
}

/// Update name, description, and visibility
///
/// Never touches membership or the cached aggregates.
pub async fn update_metadata(
    pool: &SqlitePool,
    id: PlaylistId,
    update: UpdatePlaylist,
) -> Result<Playlist> {
    let name = update.validated_name()?;

    let result = sqlx::query(
        "UPDATE playlists SET name = ?, description = ?, is_public = ? WHERE playlist_id = ?",
    )
    .bind(&name)
    .bind(&update.description)
    .bind(update.is_public)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(VerseError::PlaylistNotFound(id));
    }

    debug!("Updated metadata for playlist {}", id);

    get_by_id(pool, id)
        .await?
        .ok_or(VerseError::PlaylistNotFound(id))
}

/// Delete a playlist and all its membership rows
///
/// Membership rows ride on the `ON DELETE CASCADE` foreign key, so the
/// single header delete removes everything atomically.
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE playlist_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(VerseError::PlaylistNotFound(id));
    }

    info!("Deleted playlist {}", id);
    Ok(())
}

/// Append a song to the end of a playlist
///
/// Validates against the catalog before any transaction is opened, then
/// inserts the membership row and bumps both aggregates in one transaction.
/// The position is computed inside the INSERT, under the write lock, so
/// concurrent appends to the same playlist serialize and stay dense.
pub async fn add_song(
    pool: &SqlitePool,
    catalog: &dyn SongCatalog,
    playlist_id: PlaylistId,
    song_id: SongId,
) -> Result<()> {
    if get_by_id(pool, playlist_id).await?.is_none() {
        return Err(VerseError::PlaylistNotFound(playlist_id));
    }

    if !catalog.exists(song_id).await? || !catalog.is_active(song_id).await? {
        return Err(VerseError::InvalidReference(song_id));
    }
    let duration = catalog
        .duration_seconds(song_id)
        .await?
        .ok_or(VerseError::InvalidReference(song_id))?;

    if is_member(pool, playlist_id, song_id).await? {
        return Err(VerseError::DuplicateMembership {
            playlist_id,
            song_id,
        });
    }

    let mut tx = pool.begin().await?;

    let insert = sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, song_id, position, added_at)
        VALUES (?, ?, (SELECT COALESCE(MAX(position), 0) + 1 FROM playlist_songs WHERE playlist_id = ?), ?)
        "#,
    )
    .bind(playlist_id)
    .bind(song_id)
    .bind(playlist_id)
    .bind(Utc::now().timestamp())
    .execute(&mut *tx)
    .await;

    if let Err(err) = insert {
        // Two adds racing past the pre-check: the primary key rejects the
        // loser after the winner commits.
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Err(VerseError::DuplicateMembership {
                    playlist_id,
                    song_id,
                });
            }
        }
        return Err(err.into());
    }

    sqlx::query(
        r#"
        UPDATE playlists
        SET song_count = song_count + 1,
            total_duration_seconds = total_duration_seconds + ?
        WHERE playlist_id = ?
        "#,
    )
    .bind(duration)
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Added song {} to playlist {}", song_id, playlist_id);
    Ok(())
}

/// Remove a song from a playlist
///
/// Deletes the membership row, decrements both aggregates, and renumbers the
/// survivors to a dense 1..N sequence ordered by their pre-removal position,
/// all in one transaction. A song that has left the catalog entirely
/// contributes 0 to the duration decrement; the row must still be removable
/// to keep the count aggregate satisfiable.
pub async fn remove_song(
    pool: &SqlitePool,
    catalog: &dyn SongCatalog,
    playlist_id: PlaylistId,
    song_id: SongId,
) -> Result<()> {
    if !is_member(pool, playlist_id, song_id).await? {
        if get_by_id(pool, playlist_id).await?.is_none() {
            return Err(VerseError::PlaylistNotFound(playlist_id));
        }
        return Err(VerseError::NotMember {
            playlist_id,
            song_id,
        });
    }

    let duration = catalog.duration_seconds(song_id).await?.unwrap_or(0);

    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        // Lost a race with a concurrent removal
        return Err(VerseError::NotMember {
            playlist_id,
            song_id,
        });
    }

    sqlx::query(
        r#"
        UPDATE playlists
        SET song_count = song_count - 1,
            total_duration_seconds = MAX(total_duration_seconds - ?, 0)
        WHERE playlist_id = ?
        "#,
    )
    .bind(duration)
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    // Renumber survivors to their rank among pre-removal positions. Two
    // passes through negated ranks: a direct renumber can trip the
    // (playlist_id, position) uniqueness mid-update.
    sqlx::query(
        r#"
        UPDATE playlist_songs
        SET position = -(
            SELECT COUNT(*)
            FROM playlist_songs ps2
            WHERE ps2.playlist_id = playlist_songs.playlist_id
              AND ps2.position <= playlist_songs.position
        )
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE playlist_songs SET position = -position WHERE playlist_id = ? AND position < 0")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Removed song {} from playlist {}", song_id, playlist_id);
    Ok(())
}

/// Get a playlist header with its ordered membership
pub async fn get_details(pool: &SqlitePool, id: PlaylistId) -> Result<PlaylistDetails> {
    let playlist = get_by_id(pool, id)
        .await?
        .ok_or(VerseError::PlaylistNotFound(id))?;

    let rows = sqlx::query(
        r#"
        SELECT song_id, position, added_at
        FROM playlist_songs
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .iter()
        .map(|row| {
            Ok(PlaylistEntry {
                song_id: row.get("song_id"),
                position: row.get("position"),
                added_at: timestamp_from_row(row, "added_at")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PlaylistDetails { playlist, entries })
}

/// Whether a song is currently a member of a playlist
pub async fn is_member(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    song_id: SongId,
) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM playlist_songs WHERE playlist_id = ? AND song_id = ?",
    )
    .bind(playlist_id)
    .bind(song_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

fn playlist_from_row(row: &SqliteRow) -> Result<Playlist> {
    Ok(Playlist {
        id: row.get("playlist_id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        description: row.get("description"),
        is_public: row.get::<i64, _>("is_public") != 0,
        created_at: timestamp_from_row(row, "created_at")?,
        song_count: row.get("song_count"),
        total_duration_seconds: row.get("total_duration_seconds"),
        owner_username: None,
    })
}

fn timestamp_from_row(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(row.get::<i64, _>(column), 0)
        .ok_or_else(|| VerseError::storage("Invalid timestamp"))
}
