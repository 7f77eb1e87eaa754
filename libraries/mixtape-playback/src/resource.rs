//! Host playback capability
//!
//! Abstracts the single audio output the embedding page provides
//! (an `<audio>` element in the browser, a fake in tests).

use crate::error::Result;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// Host-provided audio playback resource
///
/// The controller is the sole mutator. Decoding, buffering and network
/// fetching all happen behind this trait.
pub trait PlaybackResource {
    /// Currently assigned media reference, `None` before the first load
    fn source(&self) -> Option<String>;

    /// Assign a media reference (does not start loading)
    fn set_source(&mut self, media_ref: &str);

    /// Ask the resource to (re)load its source
    fn load(&mut self);

    /// Request playback start
    ///
    /// # Returns
    /// * `Ok(())` - Request issued; confirmation arrives later as an event
    /// * `Err(PlayerError::PlayRejected)` - Host refused synchronously
    ///
    /// Asynchronous refusals leave the resource paused; implementations
    /// hand them to a [`RejectionSink`].
    fn play(&mut self) -> Result<()>;

    /// Request playback stop
    fn pause(&mut self);

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Jump to an absolute position in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Track length in seconds, `None` until metadata is known
    fn duration(&self) -> Option<f64>;

    fn is_paused(&self) -> bool;

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);

    /// Whether a source has been assigned
    fn has_source(&self) -> bool {
        self.source().is_some_and(|src| !src.is_empty())
    }
}

/// Receiver for play refusals that arrive after `play` has returned
///
/// Browsers deny autoplay by rejecting the promise from `play()`, long after
/// the controller finished the operation. The resource reports those
/// refusals here; the embedder decides where they go.
#[derive(Clone, Default)]
pub struct RejectionSink {
    handler: Option<Rc<dyn Fn(&str)>>,
}

impl RejectionSink {
    pub fn new(handler: impl Fn(&str) + 'static) -> Self {
        Self {
            handler: Some(Rc::new(handler)),
        }
    }

    /// Log the refusal and forward it to the handler, if any
    pub fn report(&self, message: &str) {
        warn!(error = %message, "playback start rejected by host");
        if let Some(handler) = &self.handler {
            handler(message);
        }
    }
}

impl fmt::Debug for RejectionSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RejectionSink")
            .field("connected", &self.handler.is_some())
            .finish()
    }
}

/// In-memory resource for unit tests
///
/// `play` succeeds unless `reject_play` is set; durations become known only
/// when a test sets them, like a real element waiting on metadata.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeResource {
    pub src: Option<String>,
    pub load_count: usize,
    pub play_requests: usize,
    pub paused: bool,
    pub looping: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub reject_play: bool,
}

#[cfg(test)]
impl FakeResource {
    pub fn new() -> Self {
        Self {
            paused: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl PlaybackResource for FakeResource {
    fn source(&self) -> Option<String> {
        self.src.clone()
    }

    fn set_source(&mut self, media_ref: &str) {
        self.src = Some(media_ref.to_string());
    }

    fn load(&mut self) {
        self.load_count += 1;
        self.paused = true;
        self.position = 0.0;
        self.duration = None;
    }

    fn play(&mut self) -> Result<()> {
        self.play_requests += 1;
        if self.reject_play {
            return Err(crate::error::PlayerError::PlayRejected(
                "NotAllowedError".to_string(),
            ));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}
