//! Error types for the player

use thiserror::Error;

/// Player errors
///
/// Transport operations never return these; they surface only where a
/// player is assembled (playlist, configuration) or reported by the host.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Track index outside the playlist
    #[error("Track index {index} out of range (playlist has {len} tracks)")]
    OutOfRange { index: usize, len: usize },

    /// Playlist has no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Host refused to start playback (e.g. autoplay policy)
    #[error("Playback start rejected: {0}")]
    PlayRejected(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
