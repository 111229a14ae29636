//! Verse Core
//!
//! Platform-agnostic domain types, traits, and error handling for the Verse
//! playlist engine.
//!
//! This crate defines:
//! - **Domain Types**: `Playlist`, `PlaylistEntry`, `CatalogSong`, id aliases
//! - **Core Traits**: `SongCatalog` (the seam to the external song catalog)
//! - **Error Handling**: Unified `VerseError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use verse_core::types::CreatePlaylist;
//!
//! let input = CreatePlaylist {
//!     owner_id: 1,
//!     name: "Road Trip".to_string(),
//!     description: Some("Songs for the highway".to_string()),
//!     is_public: true,
//! };
//! assert!(input.validated_name().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::SongCatalog;
pub use error::{Result, VerseError};
pub use types::{
    CatalogSong, CreatePlaylist, Playlist, PlaylistDetails, PlaylistEntry, UpdatePlaylist,
    PlaylistId, SongId, UserId,
};
