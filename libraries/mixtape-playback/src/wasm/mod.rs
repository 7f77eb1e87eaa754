//! WASM bindings for mixtape-playback
//!
//! Browser implementations of the host capabilities (`<audio>` element,
//! DOM display nodes) plus the JavaScript-facing player handle.

pub mod audio;
pub mod dom;
pub mod logging;
pub mod player;

pub use audio::HtmlAudioResource;
pub use dom::DomDisplay;
pub use player::{mount, MixtapePlayer};
