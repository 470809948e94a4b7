//! folio-rs - personal portfolio
//!
//! Hero section, experience timeline with a skills carousel, project
//! showcase and a floating music player, rendered with egui.

pub mod audio;
pub mod carousel;
pub mod content;
pub mod player;
pub mod render;
pub mod settings;
