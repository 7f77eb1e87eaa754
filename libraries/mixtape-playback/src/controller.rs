//! Player controller - transport state machine
//!
//! Owns the current index and loop/autoplay flags, drives the playback
//! resource, and mirrors resource state onto the display. The transport
//! state itself is never stored: it is read back from the resource on
//! every query so the display cannot drift from what the host is doing.

use crate::{
    config::PlayerConfig,
    display::{render, Display},
    error::Result,
    events::{PlayerEvent, ResourceEvent},
    resource::PlaybackResource,
    store::PlaylistStore,
    time::{format_remaining, format_time, known_duration, progress_percent},
    types::{PlayerSnapshot, Track, TransportState},
};
use tracing::{debug, warn};

/// Transport controller for one playlist and one playback resource
///
/// Every operation is infallible. Without a bound resource the controller
/// is an inert shell: transport operations do nothing, display syncs still
/// render the current track.
pub struct PlayerController<R, D> {
    store: PlaylistStore,
    current_index: usize,
    is_looping: bool,
    auto_play: bool,
    resource: Option<R>,
    display: D,
    pending_events: Vec<PlayerEvent>,
}

impl<R: PlaybackResource, D: Display> PlayerController<R, D> {
    /// Create an unbound controller positioned on the first track
    pub fn new(store: PlaylistStore, display: D) -> Self {
        Self {
            store,
            current_index: 0,
            is_looping: false,
            auto_play: true,
            resource: None,
            display,
            pending_events: Vec::new(),
        }
    }

    /// Create a controller from configuration
    pub fn from_config(config: &PlayerConfig, display: D) -> Result<Self> {
        config.validate()?;
        let store = PlaylistStore::new(config.playlist.clone())?;
        Ok(Self::new(store, display)
            .with_auto_play(config.auto_play)
            .with_looping(config.start_looping))
    }

    /// Set the autoplay policy (fixed for the controller's lifetime)
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Set the initial loop flag
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.is_looping = looping;
        self
    }

    /// Attach the playback resource and render the initial state
    ///
    /// The controller's loop flag is pushed onto the resource so the two
    /// agree from the start.
    pub fn bind(&mut self, mut resource: R) {
        resource.set_looping(self.is_looping);
        self.resource = Some(resource);
        self.sync_display();
    }

    pub fn is_bound(&self) -> bool {
        self.resource.is_some()
    }

    pub fn resource(&self) -> Option<&R> {
        self.resource.as_ref()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    // ===== Transport =====

    /// Assign track `index` to the resource and reload it
    ///
    /// Out-of-range indices and an unbound resource are silent no-ops.
    pub fn load(&mut self, index: usize) {
        let Some(resource) = self.resource.as_mut() else {
            debug!(index, "load ignored: no playback resource bound");
            return;
        };
        let track = match self.store.get(index) {
            Ok(track) => track,
            Err(e) => {
                debug!(error = %e, "load ignored");
                return;
            }
        };

        resource.set_source(&track.media_ref);
        resource.load();
        debug!(index, title = %track.title, "loaded track");

        let previous_index = self.current_index;
        self.current_index = index;
        self.pending_events.push(PlayerEvent::TrackChanged {
            index,
            track_id: track.id,
            previous_index,
        });
        self.sync_display();
    }

    /// Request playback, loading the current track first if nothing is assigned
    ///
    /// A refused start is logged and dropped; the resource stays paused.
    pub fn play(&mut self) {
        let needs_load = self
            .resource
            .as_ref()
            .is_some_and(|resource| !resource.has_source());
        if needs_load {
            self.load(self.current_index);
        }

        if let Some(resource) = self.resource.as_mut() {
            if let Err(e) = resource.play() {
                warn!(error = %e, index = self.current_index, "playback start rejected");
                self.pending_events.push(PlayerEvent::PlayRejected {
                    message: e.to_string(),
                });
            }
        }

        self.sync_display();
    }

    /// Request playback stop
    pub fn pause(&mut self) {
        if let Some(resource) = self.resource.as_mut() {
            resource.pause();
        }
        self.sync_display();
    }

    /// Single entry point for the play/pause control
    pub fn toggle_play_pause(&mut self) {
        match self.state() {
            TransportState::Unloaded => {
                self.load(self.current_index);
                self.play();
            }
            TransportState::Unbound | TransportState::Paused => self.play(),
            TransportState::Playing => self.pause(),
        }
    }

    /// Skip forward (wrapping) and always start playback
    pub fn next(&mut self) {
        let index = self.store.next_index(self.current_index);
        debug!(from = self.current_index, to = index, "next track");
        self.load(index);
        self.play();
    }

    /// Skip backward (wrapping) and always start playback
    pub fn previous(&mut self) {
        let index = self.store.previous_index(self.current_index);
        debug!(from = self.current_index, to = index, "previous track");
        self.load(index);
        self.play();
    }

    /// Flip the loop flag on both the controller and the resource
    ///
    /// Only the loop indicator is redrawn.
    pub fn toggle_loop(&mut self) {
        let Some(resource) = self.resource.as_mut() else {
            return;
        };
        self.is_looping = !self.is_looping;
        resource.set_looping(self.is_looping);
        self.display.set_loop_indicator(self.is_looping);
        self.pending_events.push(PlayerEvent::LoopChanged {
            looping: self.is_looping,
        });
    }

    /// Jump to `percentage` of the track length
    ///
    /// The percentage is not clamped here; callers clamp at the input
    /// boundary. Nothing happens until the resource knows its duration.
    /// No display sync: the resource reports the new position itself.
    pub fn seek_to(&mut self, percentage: f64) {
        let Some(resource) = self.resource.as_mut() else {
            return;
        };
        let Some(duration) = known_duration(resource.duration()) else {
            debug!(percentage, "seek ignored: duration unknown");
            return;
        };
        if !percentage.is_finite() {
            return;
        }

        let position = percentage / 100.0 * duration;
        debug!(percentage, position, "seek");
        resource.set_current_time(position);
    }

    /// React to a notification from the resource
    ///
    /// Every event repaints the display. `Ended` additionally advances to
    /// the next track when autoplay is on and looping is off.
    pub fn handle_event(&mut self, event: ResourceEvent) {
        self.sync_display();

        if event == ResourceEvent::Ended && self.auto_play && !self.is_looping {
            debug!(index = self.current_index, "track ended, advancing");
            self.next();
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> TransportState {
        match &self.resource {
            None => TransportState::Unbound,
            Some(resource) if !resource.has_source() => TransportState::Unloaded,
            Some(resource) if resource.is_paused() => TransportState::Paused,
            Some(_) => TransportState::Playing,
        }
    }

    /// True iff a resource is bound and not reporting paused
    pub fn is_playing(&self) -> bool {
        self.resource
            .as_ref()
            .is_some_and(|resource| !resource.is_paused())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> &Track {
        // current_index is only ever assigned from a bounds-checked lookup
        &self.store.tracks()[self.current_index]
    }

    pub fn playlist(&self) -> &[Track] {
        self.store.tracks()
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    /// Capture everything the display shows
    pub fn snapshot(&self) -> PlayerSnapshot {
        let (current_time, duration) = match &self.resource {
            Some(resource) => {
                let current = resource.current_time();
                let current = if current.is_finite() { current } else { 0.0 };
                (current, known_duration(resource.duration()))
            }
            None => (0.0, None),
        };

        PlayerSnapshot {
            index: self.current_index,
            track: self.current_track().clone(),
            state: self.state(),
            is_playing: self.is_playing(),
            is_looping: self.is_looping,
            current_time,
            duration,
            progress_percent: progress_percent(current_time, duration),
            current_label: format_time(current_time),
            total_label: duration.map_or_else(|| format_time(0.0), format_time),
            remaining_label: format_remaining(current_time, duration),
        }
    }

    /// Redraw every display field from current state
    pub fn sync_display(&mut self) {
        let snapshot = self.snapshot();
        render(&snapshot, &mut self.display);
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns everything queued since the last drain. Embedders call this
    /// after each operation to forward track/loop changes and refusals.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{MockDisplay, NullDisplay};
    use crate::resource::FakeResource;
    use mockall::predicate::eq;

    fn store(n: u32) -> PlaylistStore {
        PlaylistStore::new(
            (0..n)
                .map(|i| {
                    Track::new(
                        i + 1,
                        format!("Track {i}"),
                        format!("media/{i}.mp3"),
                        format!("art/{i}.jpg"),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn bound(n: u32) -> PlayerController<FakeResource, NullDisplay> {
        let mut controller = PlayerController::new(store(n), NullDisplay);
        controller.bind(FakeResource::new());
        controller
    }

    fn fake(controller: &PlayerController<FakeResource, NullDisplay>) -> &FakeResource {
        controller.resource().unwrap()
    }

    #[test]
    fn starts_unloaded_on_first_track() {
        let controller = bound(3);
        assert_eq!(controller.state(), TransportState::Unloaded);
        assert_eq!(controller.current_index(), 0);
        assert!(!controller.is_playing());
    }

    #[test]
    fn load_assigns_source_and_stays_paused() {
        let mut controller = bound(3);
        controller.load(2);

        assert_eq!(controller.current_index(), 2);
        assert_eq!(fake(&controller).src.as_deref(), Some("media/2.mp3"));
        assert_eq!(fake(&controller).load_count, 1);
        assert_eq!(controller.state(), TransportState::Paused);
        assert_eq!(
            controller.drain_events(),
            vec![PlayerEvent::TrackChanged {
                index: 2,
                track_id: 3,
                previous_index: 0
            }]
        );
    }

    #[test]
    fn out_of_range_load_is_ignored() {
        let mut controller = bound(3);
        controller.load(1);
        controller.load(3);
        controller.load(usize::MAX);

        assert_eq!(controller.current_index(), 1);
        assert_eq!(fake(&controller).load_count, 1);
    }

    #[test]
    fn play_loads_current_track_when_unloaded() {
        let mut controller = bound(4);
        controller.play();

        assert_eq!(fake(&controller).src.as_deref(), Some("media/0.mp3"));
        assert_eq!(fake(&controller).play_requests, 1);
        assert_eq!(controller.state(), TransportState::Playing);
    }

    #[test]
    fn rejected_play_is_swallowed() {
        let mut controller = PlayerController::new(store(2), NullDisplay);
        let mut resource = FakeResource::new();
        resource.reject_play = true;
        controller.bind(resource);

        controller.play();

        assert!(!controller.is_playing());
        assert_eq!(controller.state(), TransportState::Paused);
        assert!(controller
            .drain_events()
            .iter()
            .any(|event| matches!(event, PlayerEvent::PlayRejected { .. })));
    }

    #[test]
    fn toggle_play_pause_three_way_branch() {
        let mut controller = bound(5);
        controller.current_index = 2;

        controller.toggle_play_pause();
        assert_eq!(fake(&controller).src.as_deref(), Some("media/2.mp3"));
        assert!(controller.is_playing());

        controller.toggle_play_pause();
        assert_eq!(controller.state(), TransportState::Paused);

        controller.toggle_play_pause();
        assert!(controller.is_playing());
        assert_eq!(fake(&controller).load_count, 1);
    }

    #[test]
    fn next_wraps_and_always_plays() {
        let mut controller = bound(6);
        controller.load(5);
        assert!(!controller.is_playing());

        controller.next();

        assert_eq!(controller.current_index(), 0);
        assert_eq!(fake(&controller).src.as_deref(), Some("media/0.mp3"));
        assert!(controller.is_playing());
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut controller = bound(6);
        controller.previous();

        assert_eq!(controller.current_index(), 5);
        assert!(controller.is_playing());
    }

    #[test]
    fn toggle_loop_keeps_resource_in_step() {
        let mut controller = bound(2);
        controller.toggle_loop();
        assert!(controller.is_looping());
        assert!(fake(&controller).looping);

        controller.toggle_loop();
        assert!(!controller.is_looping());
        assert!(!fake(&controller).looping);
    }

    #[test]
    fn bind_pushes_initial_loop_flag() {
        let mut controller = PlayerController::new(store(2), NullDisplay).with_looping(true);
        controller.bind(FakeResource::new());
        assert!(fake(&controller).looping);
    }

    #[test]
    fn seek_is_unclamped_and_needs_duration() {
        let mut controller = bound(2);
        controller.load(0);

        controller.seek_to(50.0);
        assert_eq!(fake(&controller).position, 0.0);

        controller.resource.as_mut().unwrap().duration = Some(200.0);
        controller.seek_to(150.0);
        assert_eq!(fake(&controller).position, 300.0);

        controller.seek_to(25.0);
        assert_eq!(fake(&controller).position, 50.0);
    }

    #[test]
    fn ended_advances_only_with_autoplay_and_no_loop() {
        let mut controller = bound(3);
        controller.play();
        controller.handle_event(ResourceEvent::Ended);
        assert_eq!(controller.current_index(), 1);
        assert!(controller.is_playing());

        controller.toggle_loop();
        controller.handle_event(ResourceEvent::Ended);
        assert_eq!(controller.current_index(), 1);

        let mut manual = PlayerController::new(store(3), NullDisplay).with_auto_play(false);
        manual.bind(FakeResource::new());
        manual.play();
        manual.handle_event(ResourceEvent::Ended);
        assert_eq!(manual.current_index(), 0);
    }

    #[test]
    fn unbound_shell_ignores_everything() {
        let mut controller: PlayerController<FakeResource, NullDisplay> =
            PlayerController::new(store(3), NullDisplay);

        controller.play();
        controller.pause();
        controller.toggle_play_pause();
        controller.next();
        controller.previous();
        controller.toggle_loop();
        controller.seek_to(40.0);
        controller.load(2);

        assert_eq!(controller.state(), TransportState::Unbound);
        assert_eq!(controller.current_index(), 0);
        assert!(!controller.is_looping());
        assert!(!controller.is_playing());
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn snapshot_reflects_resource() {
        let mut controller = bound(2);
        controller.play();
        {
            let resource = controller.resource.as_mut().unwrap();
            resource.duration = Some(200.0);
            resource.position = 50.0;
        }

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.track.title, "Track 0");
        assert_eq!(snapshot.state, TransportState::Playing);
        assert_eq!(snapshot.progress_percent, 25.0);
        assert_eq!(snapshot.current_label, "00:50");
        assert_eq!(snapshot.total_label, "03:20");
        assert_eq!(snapshot.remaining_label, "-02:30");
    }

    #[test]
    fn snapshot_with_unknown_duration() {
        let mut controller = bound(2);
        controller.load(1);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.duration, None);
        assert_eq!(snapshot.progress_percent, 0.0);
        assert_eq!(snapshot.total_label, "00:00");
    }

    #[test]
    fn toggle_loop_redraws_only_the_indicator() {
        let mut display = MockDisplay::new();
        display.expect_set_play_state().return_const(());
        display.expect_set_loop_indicator().return_const(());
        display.expect_set_progress().return_const(());
        display.expect_set_title().return_const(());
        display.expect_set_cover().return_const(());
        display.expect_set_times().return_const(());

        let mut controller = PlayerController::new(store(2), display);
        controller.bind(FakeResource::new());

        controller.display.checkpoint();
        controller
            .display
            .expect_set_loop_indicator()
            .with(eq(true))
            .times(1)
            .return_const(());

        controller.toggle_loop();
    }

    #[test]
    fn seek_does_not_touch_display() {
        let mut display = MockDisplay::new();
        display.expect_set_play_state().return_const(());
        display.expect_set_loop_indicator().return_const(());
        display.expect_set_progress().return_const(());
        display.expect_set_title().return_const(());
        display.expect_set_cover().return_const(());
        display.expect_set_times().return_const(());

        let mut controller = PlayerController::new(store(2), display);
        let mut resource = FakeResource::new();
        resource.src = Some("media/0.mp3".to_string());
        resource.duration = Some(100.0);
        controller.bind(resource);

        controller.display.checkpoint();
        controller.seek_to(30.0);

        assert_eq!(controller.resource().unwrap().position, 30.0);
    }

    #[test]
    fn unbound_play_still_renders_current_track() {
        let mut display = MockDisplay::new();
        display
            .expect_set_play_state()
            .with(eq(false))
            .times(1)
            .return_const(());
        display.expect_set_loop_indicator().times(1).return_const(());
        display
            .expect_set_progress()
            .with(eq(0.0))
            .times(1)
            .return_const(());
        display
            .expect_set_title()
            .withf(|title| title == "Track 0")
            .times(1)
            .return_const(());
        display.expect_set_cover().times(1).return_const(());
        display
            .expect_set_times()
            .withf(|current, total, remaining| {
                current == "00:00" && total == "00:00" && remaining == "-00:00"
            })
            .times(1)
            .return_const(());

        let mut controller: PlayerController<FakeResource, MockDisplay> =
            PlayerController::new(store(2), display);
        controller.play();
    }
}
