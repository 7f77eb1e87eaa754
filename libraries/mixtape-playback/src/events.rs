//! Player events
//!
//! Two directions:
//! - [`ResourceEvent`]: notifications delivered by the playback resource
//! - [`PlayerEvent`]: notifications queued by the controller for the embedder

use serde::{Deserialize, Serialize};

/// Notifications from the playback resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceEvent {
    /// Playback position advanced
    PositionProgressed,

    /// Duration and other metadata became available
    MetadataReady,

    /// Reached the end of the source
    Ended,

    /// Playback actually started
    Started,

    /// Playback actually paused
    Paused,
}

impl ResourceEvent {
    /// Every resource event, in subscription order
    pub const ALL: [ResourceEvent; 5] = [
        ResourceEvent::PositionProgressed,
        ResourceEvent::MetadataReady,
        ResourceEvent::Ended,
        ResourceEvent::Started,
        ResourceEvent::Paused,
    ];

    /// Media element event name
    pub fn dom_name(self) -> &'static str {
        match self {
            ResourceEvent::PositionProgressed => "timeupdate",
            ResourceEvent::MetadataReady => "loadedmetadata",
            ResourceEvent::Ended => "ended",
            ResourceEvent::Started => "play",
            ResourceEvent::Paused => "pause",
        }
    }

    pub fn from_dom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.dom_name() == name)
    }
}

/// Events queued by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// A new track was assigned to the resource
    #[serde(rename_all = "camelCase")]
    TrackChanged {
        index: usize,
        track_id: u32,
        previous_index: usize,
    },

    /// Loop flag flipped
    LoopChanged { looping: bool },

    /// Host refused to start playback
    PlayRejected { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names_round_trip() {
        for event in ResourceEvent::ALL {
            assert_eq!(ResourceEvent::from_dom_name(event.dom_name()), Some(event));
        }
        assert_eq!(ResourceEvent::from_dom_name("volumechange"), None);
    }

    #[test]
    fn player_event_is_tagged() {
        let json = serde_json::to_value(PlayerEvent::LoopChanged { looping: true }).unwrap();
        assert_eq!(json["type"], "loopChanged");
        assert_eq!(json["looping"], true);
    }
}
