//! Player configuration

use crate::error::{PlayerError, Result};
use crate::types::Track;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Advance to the next track when one ends (default: true)
    #[serde(default = "default_auto_play")]
    pub auto_play: bool,

    /// Initial loop flag (default: false)
    #[serde(default)]
    pub start_looping: bool,

    /// Tracing filter directive (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bind Space/arrow/letter shortcuts on the document (default: true)
    #[serde(default = "default_keyboard_shortcuts")]
    pub keyboard_shortcuts: bool,

    #[serde(default)]
    pub elements: ElementIds,

    #[serde(default)]
    pub labels: DisplayLabels,

    #[serde(default)]
    pub playlist: Vec<Track>,
}

/// DOM ids of the playback element and every display node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub audio: String,
    pub play_pause: String,
    pub next: String,
    pub previous: String,
    pub loop_toggle: String,
    pub progress_fill: String,
    pub progress_track: String,
    pub title: String,
    pub cover: String,
    pub current_time: String,
    pub total_time: String,
    pub remaining_time: String,
}

/// Glyphs and state classes written onto the controls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayLabels {
    pub play: String,
    pub pause: String,
    pub playing_class: String,
    pub loop_active_class: String,
}

impl PlayerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PlayerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        if self.elements.audio.trim().is_empty() {
            return Err(PlayerError::InvalidConfig(
                "audio element id must not be empty".to_string(),
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(PlayerError::InvalidConfig(
                "log level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_auto_play() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_keyboard_shortcuts() -> bool {
    true
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            auto_play: default_auto_play(),
            start_looping: false,
            log_level: default_log_level(),
            keyboard_shortcuts: default_keyboard_shortcuts(),
            elements: ElementIds::default(),
            labels: DisplayLabels::default(),
            playlist: Vec::new(),
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            audio: "audio-player".to_string(),
            play_pause: "play-pause-btn".to_string(),
            next: "next-btn".to_string(),
            previous: "prev-btn".to_string(),
            loop_toggle: "loop-btn".to_string(),
            progress_fill: "progress-fill".to_string(),
            progress_track: "progress-bar".to_string(),
            title: "current-song-title".to_string(),
            cover: "cover-art".to_string(),
            current_time: "current-time".to_string(),
            total_time: "total-time".to_string(),
            remaining_time: "remaining-time".to_string(),
        }
    }
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            play: "▶".to_string(),
            pause: "⏸".to_string(),
            playing_class: "playing".to_string(),
            loop_active_class: "active".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert!(config.auto_play);
        assert!(!config.start_looping);
        assert!(config.keyboard_shortcuts);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.elements.audio, "audio-player");
        assert_eq!(config.elements.progress_track, "progress-bar");
        assert_eq!(config.labels.pause, "⏸");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = PlayerConfig::from_json(
            r#"{
                "autoPlay": false,
                "elements": { "audio": "main-audio" },
                "playlist": [
                    { "id": 1, "title": "Dawn", "mediaRef": "dawn.mp3", "artworkRef": "dawn.jpg" }
                ]
            }"#,
        )
        .unwrap();

        assert!(!config.auto_play);
        assert_eq!(config.elements.audio, "main-audio");
        assert_eq!(config.elements.next, "next-btn");
        assert_eq!(config.labels.playing_class, "playing");
        assert_eq!(config.playlist.len(), 1);
    }

    #[test]
    fn empty_playlist_is_rejected() {
        assert!(matches!(
            PlayerConfig::from_json("{}"),
            Err(PlayerError::EmptyPlaylist)
        ));
    }

    #[test]
    fn blank_audio_id_is_rejected() {
        let mut config = PlayerConfig::default();
        config.playlist.push(Track::new(1, "a", "a.mp3", "a.jpg"));
        config.elements.audio = " ".to_string();

        assert!(matches!(
            config.validate(),
            Err(PlayerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            PlayerConfig::from_json("{ autoPlay: yes }"),
            Err(PlayerError::InvalidConfig(_))
        ));
    }
}
