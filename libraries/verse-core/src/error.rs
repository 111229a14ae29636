//! Core error types for Verse

use crate::types::{PlaylistId, SongId};
use thiserror::Error;

/// Result type alias using `VerseError`
pub type Result<T> = std::result::Result<T, VerseError>;

/// Core error type for Verse
///
/// Transient kinds (`CatalogUnavailable`, `Busy`, most `Storage` causes) are
/// safe for callers to retry unchanged; every other kind requires corrected
/// input. The engine itself never retries.
#[derive(Error, Debug)]
pub enum VerseError {
    /// Malformed caller input (name, keyword, ids)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Song absent from the catalog or inactive at add-time
    #[error("Song {0} does not exist or is not active")]
    InvalidReference(SongId),

    /// Song already a member of the playlist
    #[error("Song {song_id} is already in playlist {playlist_id}")]
    DuplicateMembership {
        /// Target playlist
        playlist_id: PlaylistId,
        /// Song that is already a member
        song_id: SongId,
    },

    /// Song not currently a member of the playlist
    #[error("Song {song_id} is not in playlist {playlist_id}")]
    NotMember {
        /// Target playlist
        playlist_id: PlaylistId,
        /// Song that is not a member
        song_id: SongId,
    },

    /// Song catalog unreachable (transient, caller may retry)
    #[error("Song catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Lock contention exceeded the bounded wait (transient, caller may
    /// retry with backoff)
    #[error("Storage busy: {0}")]
    Busy(String),

    /// Underlying transactional store rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VerseError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a catalog unavailable error
    pub fn catalog_unavailable(msg: impl Into<String>) -> Self {
        Self::CatalogUnavailable(msg.into())
    }

    /// Whether a caller may retry the operation unchanged
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::CatalogUnavailable(_) | Self::Busy(_) | Self::Storage(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for VerseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if is_busy_code(db.code().as_deref()) => {
                Self::Busy(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut => Self::Busy("connection pool timed out".to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}

/// SQLITE_BUSY and its extended result codes
#[cfg(feature = "sqlx-support")]
fn is_busy_code(code: Option<&str>) -> bool {
    matches!(code, Some("5" | "261" | "517" | "773"))
}
