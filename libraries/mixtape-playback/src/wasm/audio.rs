//! `<audio>` element as a playback resource

use crate::error::{PlayerError, Result};
use crate::resource::{PlaybackResource, RejectionSink};
use tracing::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Playback resource backed by the page's audio element
pub struct HtmlAudioResource {
    element: HtmlAudioElement,
    rejections: RejectionSink,
}

impl HtmlAudioResource {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self {
            element,
            rejections: RejectionSink::default(),
        }
    }

    /// Route promise rejections from `play()` to `sink`
    pub fn with_rejection_sink(mut self, sink: RejectionSink) -> Self {
        self.rejections = sink;
        self
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl PlaybackResource for HtmlAudioResource {
    fn source(&self) -> Option<String> {
        // The `src` property resolves to an absolute URL even when unset;
        // the attribute tells whether anything was assigned.
        self.element
            .get_attribute("src")
            .filter(|src| !src.is_empty())
    }

    fn set_source(&mut self, media_ref: &str) {
        self.element.set_src(media_ref);
    }

    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlayerError::PlayRejected(js_error_message(&e)))?;

        let rejections = self.rejections.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                rejections.report(&js_error_message(&e));
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!(error = %js_error_message(&e), "pause failed");
        }
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        if duration.is_nan() {
            None
        } else {
            Some(duration)
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn is_looping(&self) -> bool {
        self.element.loop_()
    }

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}

/// Best-effort message from a thrown JS value (DOMException, Error, string)
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
