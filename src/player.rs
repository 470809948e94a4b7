//! Music player controller
//!
//! Binds the player widget to a single [`PlaybackResource`]. The resource is
//! authoritative for whether audio is playing; the controller tracks the
//! displayed position, duration, volume and layout.

use serde::{Deserialize, Serialize};

use crate::audio::{MediaEvent, PlaybackResource};

/// Seek range used until the resource reports a duration
pub const FALLBACK_SEEK_MAX: f64 = 100.0;

/// Static descriptor of the track the player is bound to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Cover art location, relative to the asset directory
    pub cover: String,
    /// Audio file location, relative to the asset directory
    pub audio: String,
}

/// The part of the widget that received a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere on the widget outside an embedded control
    Body,
    PlayPause,
    Collapse,
}

/// Player controller
pub struct Player<R> {
    resource: R,
    minimized: bool,
    current_time: f64,
    duration: Option<f64>,
    volume: f32,
}

impl<R: PlaybackResource> Player<R> {
    /// Take ownership of a resource and apply the initial volume to it
    pub fn new(resource: R, volume: f32) -> Self {
        let mut player = Self {
            resource,
            minimized: true,
            current_time: 0.0,
            duration: None,
            volume: 0.0,
        };
        player.set_volume(volume);
        player
    }

    pub fn is_playing(&self) -> bool {
        self.resource.is_playing()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Total duration, once the resource has reported it
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Upper bound for a seek control, never zero
    pub fn seek_max(&self) -> f64 {
        self.duration.unwrap_or(FALLBACK_SEEK_MAX)
    }

    /// Playback progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(d) => (self.current_time / d).clamp(0.0, 1.0) as f32,
            None => 0.0,
        }
    }

    /// Pause if playing, otherwise start playback
    pub fn toggle_play(&mut self) {
        if self.resource.is_playing() {
            self.resource.pause();
        } else if let Err(e) = self.resource.play() {
            log::warn!("Playback did not start: {}", e);
        }
    }

    pub fn on_time_update(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.current_time = seconds.max(0.0);
        }
    }

    pub fn on_loaded_metadata(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.duration = Some(seconds);
        } else {
            log::debug!("Ignoring unusable duration {}", seconds);
        }
    }

    /// Playback finished. There is no queue, so the player just stops.
    pub fn on_ended(&mut self) {
        self.resource.pause();
    }

    /// Move to `seconds`, clamped to the known duration
    pub fn seek(&mut self, seconds: f64) {
        let max = self.duration.unwrap_or(0.0);
        let target = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, max)
        };
        self.resource.set_position(target);
        self.current_time = target;
    }

    /// Set volume, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.resource.set_volume(self.volume);
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn expand(&mut self) {
        self.minimized = false;
    }

    pub fn collapse(&mut self) {
        self.minimized = true;
    }

    /// Route a click on the widget. Embedded controls never reach the body
    /// handler, and the body only expands the compact layout.
    pub fn click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Body => {
                if self.minimized {
                    self.expand();
                }
            }
            ClickTarget::PlayPause => self.toggle_play(),
            ClickTarget::Collapse => self.collapse(),
        }
    }

    /// Deliver every event the resource reported since the last frame
    pub fn pump(&mut self) {
        for event in self.resource.drain_events() {
            match event {
                MediaEvent::TimeUpdate(t) => self.on_time_update(t),
                MediaEvent::LoadedMetadata(d) => self.on_loaded_metadata(d),
                MediaEvent::Ended => self.on_ended(),
            }
        }
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioError;

    /// In-memory resource that records what the controller asked for
    #[derive(Default)]
    struct FakeResource {
        playing: bool,
        position: f64,
        volume: f32,
        seeks: usize,
        broken: bool,
        play_calls: usize,
        events: Vec<MediaEvent>,
    }

    impl PlaybackResource for FakeResource {
        fn play(&mut self) -> Result<(), AudioError> {
            self.play_calls += 1;
            if self.broken {
                return Err(AudioError::Unavailable);
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn set_position(&mut self, seconds: f64) {
            self.seeks += 1;
            self.position = seconds;
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn drain_events(&mut self) -> Vec<MediaEvent> {
            std::mem::take(&mut self.events)
        }
    }

    fn player() -> Player<FakeResource> {
        Player::new(FakeResource::default(), 0.5)
    }

    #[test]
    fn test_initial_state() {
        let p = player();
        assert!(p.is_minimized());
        assert!(!p.is_playing());
        assert_eq!(p.current_time(), 0.0);
        assert_eq!(p.duration(), None);
        assert_eq!(p.volume(), 0.5);
        assert_eq!(p.resource.volume, 0.5);
    }

    #[test]
    fn test_toggle_play() {
        let mut p = player();
        p.toggle_play();
        assert!(p.is_playing());
        p.toggle_play();
        assert!(!p.is_playing());
    }

    #[test]
    fn test_playing_follows_resource() {
        let mut p = player();
        p.toggle_play();
        // Resource stopped on its own
        p.resource.playing = false;
        assert!(!p.is_playing());
        p.toggle_play();
        assert!(p.is_playing());
    }

    #[test]
    fn test_ended_forces_pause_and_resumes_from_last_position() {
        let mut p = player();
        p.on_loaded_metadata(200.0);
        p.toggle_play();
        p.on_time_update(199.5);
        p.on_ended();
        assert!(!p.is_playing());

        // Ended on an already paused player is harmless
        p.on_ended();
        assert!(!p.is_playing());

        p.toggle_play();
        assert!(p.is_playing());
        assert_eq!(p.current_time(), 199.5);
        // Where to resume is the resource's call, not the controller's
        assert_eq!(p.resource.seeks, 0);
    }

    #[test]
    fn test_seek_is_optimistic() {
        let mut p = player();
        p.on_loaded_metadata(180.0);
        p.seek(42.0);
        assert_eq!(p.current_time(), 42.0);
        assert_eq!(p.resource.position, 42.0);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut p = player();
        p.on_loaded_metadata(180.0);
        p.seek(500.0);
        assert_eq!(p.current_time(), 180.0);
        p.seek(-3.0);
        assert_eq!(p.current_time(), 0.0);
        p.seek(f64::NAN);
        assert_eq!(p.current_time(), 0.0);
    }

    #[test]
    fn test_seek_before_metadata() {
        let mut p = player();
        assert_eq!(p.seek_max(), FALLBACK_SEEK_MAX);
        p.seek(p.seek_max());
        assert_eq!(p.current_time(), 0.0);
        assert_eq!(p.resource.position, 0.0);
    }

    #[test]
    fn test_volume_bounds() {
        let mut p = player();
        p.set_volume(0.0);
        assert_eq!(p.volume(), 0.0);
        p.set_volume(1.0);
        assert_eq!(p.volume(), 1.0);
        p.set_volume(1.5);
        assert_eq!(p.volume(), 1.0);
        assert_eq!(p.resource.volume, 1.0);
        p.set_volume(-0.2);
        assert_eq!(p.volume(), 0.0);
        p.set_volume(f32::NAN);
        assert_eq!(p.volume(), 0.0);
    }

    #[test]
    fn test_metadata_rejects_bad_durations() {
        let mut p = player();
        p.on_loaded_metadata(f64::NAN);
        p.on_loaded_metadata(f64::INFINITY);
        p.on_loaded_metadata(0.0);
        assert_eq!(p.duration(), None);
        p.on_loaded_metadata(90.0);
        assert_eq!(p.duration(), Some(90.0));
        assert_eq!(p.seek_max(), 90.0);
    }

    #[test]
    fn test_broken_resource_stays_paused() {
        let mut p = Player::new(
            FakeResource {
                broken: true,
                ..Default::default()
            },
            0.5,
        );
        p.toggle_play();
        p.toggle_play();
        assert!(!p.is_playing());
        assert_eq!(p.resource.play_calls, 2);

        // Everything else keeps working
        p.click(ClickTarget::Body);
        assert!(!p.is_minimized());
        p.set_volume(0.8);
        assert_eq!(p.volume(), 0.8);
    }

    #[test]
    fn test_all_layout_and_playback_combinations() {
        let mut p = player();
        let mut seen = Vec::new();
        for _ in 0..2 {
            for _ in 0..2 {
                seen.push((p.is_minimized(), p.is_playing()));
                p.toggle_play();
            }
            p.toggle_minimized();
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_body_click_only_expands() {
        let mut p = player();
        p.click(ClickTarget::Body);
        assert!(!p.is_minimized());
        // Expanded body click does not collapse
        p.click(ClickTarget::Body);
        assert!(!p.is_minimized());
        p.click(ClickTarget::Collapse);
        assert!(p.is_minimized());
    }

    #[test]
    fn test_play_button_does_not_expand() {
        let mut p = player();
        p.click(ClickTarget::PlayPause);
        assert!(p.is_playing());
        assert!(p.is_minimized());
    }

    #[test]
    fn test_pump_dispatches_events() {
        let mut p = player();
        p.toggle_play();
        p.resource.events = vec![
            MediaEvent::LoadedMetadata(120.0),
            MediaEvent::TimeUpdate(3.0),
            MediaEvent::TimeUpdate(3.25),
        ];
        p.pump();
        assert_eq!(p.duration(), Some(120.0));
        assert_eq!(p.current_time(), 3.25);
        assert!(p.is_playing());

        p.resource.events = vec![MediaEvent::Ended];
        p.pump();
        assert!(!p.is_playing());
    }

    #[test]
    fn test_progress() {
        let mut p = player();
        p.on_time_update(30.0);
        assert_eq!(p.progress(), 0.0);
        p.on_loaded_metadata(120.0);
        assert_eq!(p.progress(), 0.25);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3725.0), "62:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
