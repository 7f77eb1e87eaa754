//! Mixtape - Playlist Playback Widget
//!
//! Binds a fixed playlist to a single host playback resource and mirrors
//! playback state onto a set of display fields.
//!
//! This crate provides:
//! - Immutable playlist storage
//! - Transport state machine (play/pause/next/previous/loop/seek)
//! - Display snapshots and `MM:SS` time labels
//! - Auto-advance when a track ends
//! - Keyboard shortcut mapping
//! - Browser bindings (`wasm` feature): `<audio>` element and DOM display
//!
//! # Architecture
//!
//! The controller is platform-agnostic. The host supplies two capabilities
//! through traits:
//! - [`PlaybackResource`]: the audio output (decoding and fetching live there)
//! - [`Display`]: one setter per visual field
//!
//! # Example
//!
//! ```rust
//! use mixtape_playback::{NullDisplay, PlayerController, PlaylistStore, Track};
//! # use mixtape_playback::{PlaybackResource, Result};
//! # #[derive(Default)]
//! # struct Element { src: Option<String>, paused: bool, looping: bool, time: f64 }
//! # impl PlaybackResource for Element {
//! #     fn source(&self) -> Option<String> { self.src.clone() }
//! #     fn set_source(&mut self, media_ref: &str) { self.src = Some(media_ref.into()); }
//! #     fn load(&mut self) { self.paused = true; }
//! #     fn play(&mut self) -> Result<()> { self.paused = false; Ok(()) }
//! #     fn pause(&mut self) { self.paused = true; }
//! #     fn current_time(&self) -> f64 { self.time }
//! #     fn set_current_time(&mut self, seconds: f64) { self.time = seconds; }
//! #     fn duration(&self) -> Option<f64> { None }
//! #     fn is_paused(&self) -> bool { self.paused }
//! #     fn is_looping(&self) -> bool { self.looping }
//! #     fn set_looping(&mut self, looping: bool) { self.looping = looping; }
//! # }
//!
//! let store = PlaylistStore::new(vec![
//!     Track::new(1, "First Light", "audio/first.mp3", "covers/first.jpg"),
//!     Track::new(2, "Undertow", "audio/undertow.mp3", "covers/undertow.jpg"),
//! ])?;
//!
//! let mut player = PlayerController::new(store, NullDisplay);
//! player.bind(Element::default());
//!
//! player.toggle_play_pause();
//! assert!(player.is_playing());
//!
//! player.next();
//! assert_eq!(player.current_track().title, "Undertow");
//! # Ok::<(), mixtape_playback::PlayerError>(())
//! ```

mod config;
mod controller;
mod display;
mod error;
mod events;
mod resource;
pub mod shortcuts;
mod store;
pub mod time;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::{DisplayLabels, ElementIds, PlayerConfig};
pub use controller::PlayerController;
pub use display::{render, Display, NullDisplay};
pub use error::{PlayerError, Result};
pub use events::{PlayerEvent, ResourceEvent};
pub use resource::{PlaybackResource, RejectionSink};
pub use store::PlaylistStore;
pub use time::format_time;
pub use types::{PlayerSnapshot, Track, TransportState};
