//! WASM-compatible player handle and page wiring

use super::audio::{js_error_message, HtmlAudioResource};
use super::dom::DomDisplay;
use super::logging;
use crate::{
    config::PlayerConfig,
    controller::PlayerController,
    events::{PlayerEvent, ResourceEvent},
    resource::RejectionSink,
    shortcuts::{action_for_key, is_editable_tag, Modifiers, ShortcutAction},
    time::click_percentage,
    types::{PlayerSnapshot, Track},
};
use js_sys::Function;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAudioElement, KeyboardEvent,
    MouseEvent,
};

type WebController = PlayerController<HtmlAudioResource, DomDisplay>;

#[derive(Default, Clone)]
struct Callbacks {
    on_state_change: Option<Function>,
    on_track_change: Option<Function>,
    on_error: Option<Function>,
}

/// State shared between the JS handle and every DOM listener
struct Shared {
    controller: RefCell<WebController>,
    callbacks: RefCell<Callbacks>,
    playlist: Vec<Track>,
}

impl Shared {
    /// Run `f` against the controller, then forward queued events and the
    /// new snapshot to JS callbacks
    ///
    /// The controller borrow is released before any callback runs, so
    /// callbacks may call back into the player. A re-entrant call while the
    /// controller is borrowed is dropped; the next event repaints anyway.
    fn update(&self, f: impl FnOnce(&mut WebController)) {
        let (snapshot, events) = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                debug!("player busy, dropping re-entrant call");
                return;
            };
            f(&mut controller);
            (controller.snapshot(), controller.drain_events())
        };
        self.notify(&snapshot, &events);
    }

    fn read<T>(&self, f: impl FnOnce(&WebController) -> T) -> Option<T> {
        self.controller
            .try_borrow()
            .ok()
            .map(|controller| f(&controller))
    }

    fn notify(&self, snapshot: &PlayerSnapshot, events: &[PlayerEvent]) {
        let callbacks = self.callbacks.borrow().clone();

        for event in events {
            match event {
                PlayerEvent::TrackChanged { index, .. } => {
                    if let (Some(callback), Some(track)) =
                        (&callbacks.on_track_change, self.playlist.get(*index))
                    {
                        call_with(callback, track);
                    }
                }
                PlayerEvent::PlayRejected { message } => self.report_error(message),
                PlayerEvent::LoopChanged { .. } => {}
            }
        }

        if let Some(ref callback) = callbacks.on_state_change {
            call_with(callback, snapshot);
        }
    }
}

impl Shared {
    fn report_error(&self, message: &str) {
        let Some(callback) = self.callbacks.borrow().on_error.clone() else {
            return;
        };
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(message)) {
            warn!(error = %js_error_message(&e), "player callback threw");
        }
    }
}

fn call_with<T: Serialize>(callback: &Function, value: &T) {
    match serde_wasm_bindgen::to_value(value) {
        Ok(js_value) => {
            if let Err(e) = callback.call1(&JsValue::NULL, &js_value) {
                warn!(error = %js_error_message(&e), "player callback threw");
            }
        }
        Err(e) => warn!(error = %e, "failed to serialize callback payload"),
    }
}

/// JavaScript handle to a mounted player
#[wasm_bindgen]
pub struct MixtapePlayer {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl MixtapePlayer {
    // ===== Transport =====

    /// Start or resume playback
    pub fn play(&self) {
        self.shared.update(|controller| controller.play());
    }

    /// Pause playback
    pub fn pause(&self) {
        self.shared.update(|controller| controller.pause());
    }

    /// Play/pause button behaviour
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.shared.update(|controller| controller.toggle_play_pause());
    }

    /// Skip to next track (wraps) and play
    pub fn next(&self) {
        self.shared.update(|controller| controller.next());
    }

    /// Skip to previous track (wraps) and play
    pub fn previous(&self) {
        self.shared.update(|controller| controller.previous());
    }

    /// Load a track without starting it
    pub fn load(&self, index: usize) {
        self.shared.update(|controller| controller.load(index));
    }

    #[wasm_bindgen(js_name = toggleLoop)]
    pub fn toggle_loop(&self) {
        self.shared.update(|controller| controller.toggle_loop());
    }

    /// Seek to a percentage of the track (not clamped)
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, percentage: f64) {
        self.shared.update(|controller| controller.seek_to(percentage));
    }

    // ===== State Queries =====

    #[wasm_bindgen(js_name = getPlaylist)]
    pub fn get_playlist(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.shared.playlist).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = getCurrentIndex)]
    pub fn get_current_index(&self) -> usize {
        self.shared
            .read(|controller| controller.current_index())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getCurrentSong)]
    pub fn get_current_song(&self) -> JsValue {
        self.shared
            .read(|controller| serde_wasm_bindgen::to_value(controller.current_track()).ok())
            .flatten()
            .unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.shared
            .read(|controller| controller.is_playing())
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isLooping)]
    pub fn is_looping(&self) -> bool {
        self.shared
            .read(|controller| controller.is_looping())
            .unwrap_or(false)
    }

    /// "unbound" | "unloaded" | "paused" | "playing"
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.shared
            .read(|controller| controller.state().as_str().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> JsValue {
        self.shared
            .read(|controller| serde_wasm_bindgen::to_value(&controller.snapshot()).ok())
            .flatten()
            .unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Called with a state snapshot after every display sync
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        self.shared.callbacks.borrow_mut().on_state_change = Some(callback);
    }

    /// Called with the new track after every load
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&self, callback: Function) {
        self.shared.callbacks.borrow_mut().on_track_change = Some(callback);
    }

    /// Called with a message when the browser refuses to start playback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&self, callback: Function) {
        self.shared.callbacks.borrow_mut().on_error = Some(callback);
    }
}

/// Create a player and bind it to the page once the document is interactive
///
/// `config` is a plain object matching `PlayerConfig` (camelCase keys).
/// A missing audio element leaves an inert player and logs a warning.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<MixtapePlayer, JsValue> {
    console_error_panic_hook::set_once();

    let config: PlayerConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    logging::init(&config.log_level);

    let display = DomDisplay::new(config.elements.clone(), config.labels.clone());
    let controller = PlayerController::from_config(&config, display)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let shared = Rc::new(Shared {
        controller: RefCell::new(controller),
        callbacks: RefCell::default(),
        playlist: config.playlist.clone(),
    });

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    let pending = Rc::clone(&shared);
    when_interactive(&document, move || attach(&pending, &config));

    Ok(MixtapePlayer { shared })
}

fn when_interactive(document: &Document, ready: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        ready();
        return;
    }

    let closure = Closure::once(ready);
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
    {
        warn!(error = %js_error_message(&e), "failed to wait for DOMContentLoaded");
    }
    closure.forget();
}

fn attach(shared: &Rc<Shared>, config: &PlayerConfig) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let ids = &config.elements;

    let Some(audio) = document
        .get_element_by_id(&ids.audio)
        .and_then(|element| element.dyn_into::<HtmlAudioElement>().ok())
    else {
        warn!(id = %ids.audio, "audio element not found, player disabled");
        return;
    };

    let weak = Rc::downgrade(shared);
    let rejections = RejectionSink::new(move |message| {
        if let Some(shared) = weak.upgrade() {
            shared.report_error(message);
        }
    });
    let resource = HtmlAudioResource::new(audio.clone()).with_rejection_sink(rejections);
    shared.update(|controller| controller.bind(resource));

    for event in ResourceEvent::ALL {
        let shared = Rc::clone(shared);
        listen(&audio, event.dom_name(), move |_| {
            shared.update(|controller| controller.handle_event(event));
        });
    }

    on_click(&document, &ids.play_pause, shared, WebController::toggle_play_pause);
    on_click(&document, &ids.next, shared, WebController::next);
    on_click(&document, &ids.previous, shared, WebController::previous);
    on_click(&document, &ids.loop_toggle, shared, WebController::toggle_loop);

    if let Some(track) = document.get_element_by_id(&ids.progress_track) {
        let shared = Rc::clone(shared);
        let bar = track.clone();
        listen(&track, "click", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = bar.get_bounding_client_rect();
            let offset = f64::from(event.client_x()) - rect.left();
            if let Some(percentage) = click_percentage(offset, rect.width()) {
                shared.update(|controller| controller.seek_to(percentage));
            }
        });
    } else {
        debug!(id = %ids.progress_track, "progress track not found, seeking by click disabled");
    }

    if config.keyboard_shortcuts {
        let shared = Rc::clone(shared);
        listen(&document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.default_prevented() || event.is_composing() || is_shortcut_blocked(event) {
                return;
            }
            let modifiers = Modifiers {
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                alt: event.alt_key(),
            };
            let Some(action) = action_for_key(&event.key(), modifiers) else {
                return;
            };
            event.prevent_default();
            shared.update(|controller| match action {
                ShortcutAction::TogglePlay => controller.toggle_play_pause(),
                ShortcutAction::Next => controller.next(),
                ShortcutAction::Previous => controller.previous(),
                ShortcutAction::ToggleLoop => controller.toggle_loop(),
            });
        });
    }

    let (tracks, auto_play) = shared
        .read(|controller| (controller.playlist().len(), controller.auto_play()))
        .unwrap_or_default();
    info!(tracks, auto_play, "player mounted");
}

fn on_click(
    document: &Document,
    id: &str,
    shared: &Rc<Shared>,
    action: fn(&mut WebController),
) {
    let Some(element) = document.get_element_by_id(id) else {
        debug!(id, "control not found, skipping");
        return;
    };
    let shared = Rc::clone(shared);
    listen(&element, "click", move |_| shared.update(action));
}

fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
    {
        warn!(event = name, error = %js_error_message(&e), "failed to attach listener");
    }
    // Listeners live as long as the page
    closure.forget();
}

/// Key events aimed at text entry, or Space on a focused button (which the
/// button already turns into a click), are left to the page
fn is_shortcut_blocked(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };
    let mut current = target.dyn_into::<Element>().ok();

    if let Some(ref element) = current {
        if event.key() == " " && element.tag_name().eq_ignore_ascii_case("button") {
            return true;
        }
    }

    while let Some(element) = current {
        if is_editable_tag(&element.tag_name()) {
            return true;
        }
        if element
            .get_attribute("contenteditable")
            .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}
