//! Core types for the player

use serde::{Deserialize, Serialize};

/// A single playlist entry
///
/// Created once from the static playlist and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Display identifier (not used for lookup)
    pub id: u32,

    /// Track title
    pub title: String,

    /// Media reference handed to the playback resource
    pub media_ref: String,

    /// Cover art reference
    pub artwork_ref: String,
}

impl Track {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        media_ref: impl Into<String>,
        artwork_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            media_ref: media_ref.into(),
            artwork_ref: artwork_ref.into(),
        }
    }
}

/// Transport state, derived from the playback resource on every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// No playback resource bound; every operation is a no-op
    Unbound,

    /// Resource bound but no source assigned yet
    Unloaded,

    /// Source assigned, resource reports paused
    Paused,

    /// Source assigned, resource reports playing
    Playing,
}

impl TransportState {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportState::Unbound => "unbound",
            TransportState::Unloaded => "unloaded",
            TransportState::Paused => "paused",
            TransportState::Playing => "playing",
        }
    }
}

/// Everything the display needs, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub index: usize,
    pub track: Track,
    pub state: TransportState,
    pub is_playing: bool,
    pub is_looping: bool,

    /// Playback position in seconds
    pub current_time: f64,

    /// Track length in seconds, once metadata has arrived
    pub duration: Option<f64>,

    /// Progress fill width, 0-100 (may exceed 100 after an unclamped seek)
    pub progress_percent: f64,

    pub current_label: String,
    pub total_label: String,
    pub remaining_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_serializes_with_camel_case_keys() {
        let track = Track::new(3, "Night Drive", "audio/night.mp3", "covers/night.jpg");
        let json = serde_json::to_value(&track).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["mediaRef"], "audio/night.mp3");
        assert_eq!(json["artworkRef"], "covers/night.jpg");
    }

    #[test]
    fn transport_state_names() {
        assert_eq!(TransportState::Unbound.as_str(), "unbound");
        assert_eq!(TransportState::Playing.as_str(), "playing");
        assert_eq!(
            serde_json::to_string(&TransportState::Unloaded).unwrap(),
            "\"unloaded\""
        );
    }
}
