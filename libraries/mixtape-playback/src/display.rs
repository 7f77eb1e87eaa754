//! Display adapter
//!
//! The controller never looks up UI nodes itself. It pushes values through
//! [`Display`], one method per logical field; implementations skip any
//! field whose node is missing.

use crate::types::PlayerSnapshot;

/// Sink for player state
#[cfg_attr(test, mockall::automock)]
pub trait Display {
    /// Play/pause control: glyph and state class
    fn set_play_state(&mut self, playing: bool);

    /// Loop control state class
    fn set_loop_indicator(&mut self, looping: bool);

    /// Progress fill width as a percentage
    fn set_progress(&mut self, percent: f64);

    fn set_title(&mut self, title: &str);

    /// Cover image source and alternative text
    fn set_cover(&mut self, src: &str, alt: &str);

    /// Current, total and remaining time labels
    fn set_times(&mut self, current: &str, total: &str, remaining: &str);
}

/// Display that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn set_play_state(&mut self, _playing: bool) {}
    fn set_loop_indicator(&mut self, _looping: bool) {}
    fn set_progress(&mut self, _percent: f64) {}
    fn set_title(&mut self, _title: &str) {}
    fn set_cover(&mut self, _src: &str, _alt: &str) {}
    fn set_times(&mut self, _current: &str, _total: &str, _remaining: &str) {}
}

/// Push a full snapshot to every field
pub fn render<D: Display + ?Sized>(snapshot: &PlayerSnapshot, display: &mut D) {
    display.set_play_state(snapshot.is_playing);
    display.set_loop_indicator(snapshot.is_looping);
    display.set_progress(snapshot.progress_percent);
    display.set_title(&snapshot.track.title);
    display.set_cover(&snapshot.track.artwork_ref, &snapshot.track.title);
    display.set_times(
        &snapshot.current_label,
        &snapshot.total_label,
        &snapshot.remaining_label,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Track, TransportState};
    use mockall::predicate::eq;

    fn snapshot() -> PlayerSnapshot {
        PlayerSnapshot {
            index: 1,
            track: Track::new(2, "Harbor Lights", "harbor.mp3", "harbor.jpg"),
            state: TransportState::Playing,
            is_playing: true,
            is_looping: false,
            current_time: 30.0,
            duration: Some(120.0),
            progress_percent: 25.0,
            current_label: "00:30".to_string(),
            total_label: "02:00".to_string(),
            remaining_label: "-01:30".to_string(),
        }
    }

    #[test]
    fn render_pushes_every_field_once() {
        let mut display = MockDisplay::new();
        display
            .expect_set_play_state()
            .with(eq(true))
            .times(1)
            .return_const(());
        display
            .expect_set_loop_indicator()
            .with(eq(false))
            .times(1)
            .return_const(());
        display
            .expect_set_progress()
            .with(eq(25.0))
            .times(1)
            .return_const(());
        display
            .expect_set_title()
            .withf(|title| title == "Harbor Lights")
            .times(1)
            .return_const(());
        display
            .expect_set_cover()
            .withf(|src, alt| src == "harbor.jpg" && alt == "Harbor Lights")
            .times(1)
            .return_const(());
        display
            .expect_set_times()
            .withf(|current, total, remaining| {
                current == "00:30" && total == "02:00" && remaining == "-01:30"
            })
            .times(1)
            .return_const(());

        render(&snapshot(), &mut display);
    }

    #[test]
    fn null_display_accepts_render() {
        render(&snapshot(), &mut NullDisplay);
    }
}
