//! Audio module - playback resources for the music player
//!
//! This module provides:
//! - The playback resource trait and its event type
//! - File playback with symphonia decoding and cpal output

mod file;
mod resource;

pub use file::FileResource;
pub use resource::{AudioError, MediaEvent, PlaybackResource};
