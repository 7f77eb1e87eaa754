//! DOM display nodes

use crate::config::{DisplayLabels, ElementIds};
use crate::display::Display;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlElement, HtmlImageElement};

/// Display that writes into elements looked up by id
///
/// Lookups happen on every write, so nodes added or removed after mount
/// are picked up. A missing node is skipped.
pub struct DomDisplay {
    ids: ElementIds,
    labels: DisplayLabels,
}

impl DomDisplay {
    pub fn new(ids: ElementIds, labels: DisplayLabels) -> Self {
        Self { ids, labels }
    }

    fn element(id: &str) -> Option<Element> {
        window()?.document()?.get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(element) = Self::element(id) {
            if element.text_content().as_deref() != Some(text) {
                element.set_text_content(Some(text));
            }
        }
    }
}

impl Display for DomDisplay {
    fn set_play_state(&mut self, playing: bool) {
        let Some(button) = Self::element(&self.ids.play_pause) else {
            return;
        };
        let (glyph, label) = if playing {
            (self.labels.pause.as_str(), "Pause")
        } else {
            (self.labels.play.as_str(), "Play")
        };
        button.set_text_content(Some(glyph));
        let _ = button.set_attribute("aria-label", label);
        let _ = button
            .class_list()
            .toggle_with_force(&self.labels.playing_class, playing);
    }

    fn set_loop_indicator(&mut self, looping: bool) {
        let Some(button) = Self::element(&self.ids.loop_toggle) else {
            return;
        };
        let _ = button
            .class_list()
            .toggle_with_force(&self.labels.loop_active_class, looping);
        let _ = button.set_attribute("aria-pressed", if looping { "true" } else { "false" });
    }

    fn set_progress(&mut self, percent: f64) {
        let Some(fill) = Self::element(&self.ids.progress_fill) else {
            return;
        };
        if let Some(fill) = fill.dyn_ref::<HtmlElement>() {
            let _ = fill.style().set_property("width", &format!("{percent}%"));
        }
    }

    fn set_title(&mut self, title: &str) {
        Self::set_text(&self.ids.title, title);
    }

    fn set_cover(&mut self, src: &str, alt: &str) {
        let Some(cover) = Self::element(&self.ids.cover) else {
            return;
        };
        // Reassigning an identical src can restart the image fetch
        let src_changed = cover.get_attribute("src").as_deref() != Some(src);
        if let Some(image) = cover.dyn_ref::<HtmlImageElement>() {
            if src_changed {
                image.set_src(src);
            }
            image.set_alt(alt);
        } else {
            if src_changed {
                let _ = cover.set_attribute("src", src);
            }
            let _ = cover.set_attribute("alt", alt);
        }
    }

    fn set_times(&mut self, current: &str, total: &str, remaining: &str) {
        Self::set_text(&self.ids.current_time, current);
        Self::set_text(&self.ids.total_time, total);
        Self::set_text(&self.ids.remaining_time, remaining);
    }
}
