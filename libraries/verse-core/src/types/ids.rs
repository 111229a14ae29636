//! Identifier aliases
//!
//! All entities are keyed by database-assigned integer ids.

/// Playlist identifier
pub type PlaylistId = i64;

/// Song identifier (assigned by the external song catalog)
pub type SongId = i64;

/// User identifier (opaque to this engine; validated by the caller)
pub type UserId = i64;
