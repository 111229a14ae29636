//! Song catalog seam
//!
//! The playlist engine consults the catalog for a song's existence, active
//! status, and duration. It never mutates the catalog. Implementations that
//! cannot reach their backing store fail with
//! [`VerseError::CatalogUnavailable`](crate::VerseError::CatalogUnavailable),
//! which callers may retry.

use crate::error::Result;
use crate::types::SongId;
use async_trait::async_trait;

/// Authoritative source for song existence, active status, and duration
#[async_trait]
pub trait SongCatalog: Send + Sync {
    /// Whether the catalog has any record of the song
    async fn exists(&self, song_id: SongId) -> Result<bool>;

    /// Whether the song is currently active (available for playback)
    ///
    /// Returns `false` for songs the catalog does not know at all.
    async fn is_active(&self, song_id: SongId) -> Result<bool>;

    /// Duration in seconds, or `None` when the song has left the catalog
    ///
    /// A removed member song's duration contribution degrades to `None`; the
    /// engine treats that as 0 when decrementing aggregates so the membership
    /// row stays removable.
    async fn duration_seconds(&self, song_id: SongId) -> Result<Option<i64>>;
}
