//! Render module - UI components for the portfolio page

mod background;
mod carousel;
mod player;
pub mod sections;
pub mod theme;

pub use background::{Background, BackgroundSettings};
pub use carousel::{CarouselView, CarouselViewSettings};
pub use player::PlayerWidget;
