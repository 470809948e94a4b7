//! Playback resource abstraction
//!
//! The player controller never talks to cpal or symphonia directly. It drives
//! a [`PlaybackResource`] and reacts to the [`MediaEvent`]s the resource
//! reports back.

use thiserror::Error;

/// Errors that can occur while opening or driving a playback resource
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to probe audio format: {0}")]
    ProbeError(String),

    #[error("No audio tracks found")]
    NoTracks,

    #[error("Decoder error: {0}")]
    DecoderError(String),

    #[error("Audio output error: {0}")]
    OutputError(String),

    #[error("Playback resource unavailable")]
    Unavailable,
}

/// Notifications emitted by a playback resource.
///
/// Time updates arrive at a resource-determined rate and are only guaranteed
/// to be non-decreasing while playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Current playback position in seconds
    TimeUpdate(f64),
    /// Total duration in seconds, reported once
    LoadedMetadata(f64),
    /// Playback reached the end of the media
    Ended,
}

/// A single playback handle bound to one media file.
///
/// The resource owns the truth about whether it is playing; callers derive
/// their own "playing" flag from [`PlaybackResource::is_playing`].
pub trait PlaybackResource {
    /// Start or resume playback from the current position
    fn play(&mut self) -> Result<(), AudioError>;

    /// Pause playback, keeping the current position
    fn pause(&mut self);

    /// Whether audio is actually being produced
    fn is_playing(&self) -> bool;

    /// Move the playback position, in seconds
    fn set_position(&mut self, seconds: f64);

    /// Set output volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    /// Take all events reported since the last call
    fn drain_events(&mut self) -> Vec<MediaEvent>;
}
