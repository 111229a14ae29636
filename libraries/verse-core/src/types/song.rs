//! Song catalog read-model

use crate::types::SongId;
use serde::{Deserialize, Serialize};

/// Summary of a song as reported by the external catalog
///
/// The engine consults this at add-time only; duration is captured into the
/// playlist aggregate and not re-validated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSong {
    /// Song identifier
    pub song_id: SongId,

    /// Duration in seconds, non-negative
    pub duration_seconds: i64,

    /// Whether the catalog still offers this song
    pub is_active: bool,
}
