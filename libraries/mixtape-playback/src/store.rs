//! Immutable playlist storage

use crate::error::{PlayerError, Result};
use crate::types::Track;

/// Ordered, read-only list of tracks
///
/// Indices are contiguous `0..len()`. A store always holds at least one
/// track, so an index into it can always be kept valid.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    tracks: Vec<Track>,
}

impl PlaylistStore {
    /// Build a store from the static track list
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Parse a JSON array of tracks
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> =
            serde_json::from_str(json).map_err(|e| PlayerError::InvalidConfig(e.to_string()))?;
        Self::new(tracks)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Result<&Track> {
        self.tracks.get(index).ok_or(PlayerError::OutOfRange {
            index,
            len: self.tracks.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `index`, wrapping from last to first
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping from first to last
    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.tracks.len();
        (index + len - 1) % len
    }
}
