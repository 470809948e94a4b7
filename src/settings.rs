use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Returns the path to the settings file: `~/.config/folio-rs/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("folio-rs");
    path.push("settings.json");
    path
}

/// Startup configuration.
///
/// Read once from the platform config directory. Fields use
/// `#[serde(default)]` so a partial file only overrides what it names.
/// Nothing the user does at runtime is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// JSON content file replacing the built-in portfolio
    pub content_path: Option<PathBuf>,
    /// Root that track and image paths are resolved against
    pub asset_dir: PathBuf,
    /// Carousel auto-advance period; 0 disables it
    pub carousel_interval_ms: u64,
    /// Player volume at startup
    pub initial_volume: f32,

    // Window
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            content_path: None,
            asset_dir: PathBuf::from("assets"),
            carousel_interval_ms: 3000,
            initial_volume: 0.5,

            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn carousel_interval(&self) -> Option<Duration> {
        (self.carousel_interval_ms > 0).then(|| Duration::from_millis(self.carousel_interval_ms))
    }

    /// Resolve a content-relative asset path
    pub fn asset(&self, relative: &str) -> PathBuf {
        self.asset_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{ "carousel_interval_ms": 5000 }"#).unwrap();
        assert_eq!(settings.carousel_interval(), Some(Duration::from_secs(5)));
        assert_eq!(settings.initial_volume, 0.5);
        assert_eq!(settings.asset_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_zero_interval_disables_carousel_timer() {
        let settings = AppSettings {
            carousel_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.carousel_interval(), None);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = AppSettings::load_from(Path::new("does/not/exist.json"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_asset_resolution() {
        let settings = AppSettings::default();
        assert_eq!(
            settings.asset("song/a.mp3"),
            PathBuf::from("assets").join("song/a.mp3")
        );
    }
}
