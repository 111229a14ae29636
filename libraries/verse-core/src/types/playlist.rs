//! Playlist domain types

use crate::error::{Result, VerseError};
use crate::types::{PlaylistId, SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist header with cached aggregates
///
/// `song_count` and `total_duration_seconds` are denormalized: they are kept
/// exactly consistent with the membership rows by the engine's transactions
/// and are never recomputed on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner user ID (opaque reference, validated by the caller)
    pub owner_id: UserId,

    /// Playlist name (trimmed, 2-100 characters)
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Whether the playlist is visible to other users
    pub is_public: bool,

    /// Creation timestamp, immutable after creation
    pub created_at: DateTime<Utc>,

    /// Cached number of member songs
    pub song_count: i64,

    /// Cached sum of member song durations, in seconds
    pub total_duration_seconds: i64,

    /// Owner's username, populated by listing/search projections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    /// Owner user ID
    pub owner_id: UserId,
    /// Playlist name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Public visibility
    pub is_public: bool,
}

impl CreatePlaylist {
    /// Validate and return the trimmed name
    pub fn validated_name(&self) -> Result<String> {
        validate_name(&self.name)
    }
}

/// Metadata patch for an existing playlist
///
/// Never touches membership or the cached aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    /// New playlist name
    pub name: String,
    /// New description
    pub description: Option<String>,
    /// New public visibility
    pub is_public: bool,
}

impl UpdatePlaylist {
    /// Validate and return the trimmed name
    pub fn validated_name(&self) -> Result<String> {
        validate_name(&self.name)
    }
}

/// A single membership row: one song currently in one playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Member song ID
    pub song_id: SongId,

    /// 1-based position within the playlist; positions of a playlist with N
    /// members are exactly 1..N
    pub position: i64,

    /// When the song was added to the playlist
    pub added_at: DateTime<Utc>,
}

/// Playlist header together with its ordered membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetails {
    /// The playlist header
    pub playlist: Playlist,

    /// Membership rows ordered by ascending position
    pub entries: Vec<PlaylistEntry>,
}

impl PlaylistDetails {
    /// Member song ids in playlist order
    pub fn song_ids(&self) -> Vec<SongId> {
        self.entries.iter().map(|e| e.song_id).collect()
    }
}

/// Validate a playlist name: trimmed, 2-100 characters
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(VerseError::invalid_input("Playlist name is required"));
    }
    let len = trimmed.chars().count();
    if len < 2 {
        return Err(VerseError::invalid_input(
            "Playlist name must be at least 2 characters long",
        ));
    }
    if len > 100 {
        return Err(VerseError::invalid_input(
            "Playlist name cannot exceed 100 characters",
        ));
    }
    Ok(trimmed.to_string())
}
