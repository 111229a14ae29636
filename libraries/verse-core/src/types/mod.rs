//! Domain types for the Verse playlist engine

mod ids;
mod playlist;
mod song;

pub use ids::{PlaylistId, SongId, UserId};
pub use playlist::{
    validate_name, CreatePlaylist, Playlist, PlaylistDetails, PlaylistEntry, UpdatePlaylist,
};
pub use song::CatalogSong;
