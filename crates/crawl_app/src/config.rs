//! Application configuration
//!
//! Stored as TOML; every section is optional:
//!
//! ```toml
//! soundtrack = "assets/theme.ogg"
//! font = "assets/NewsCycle-Bold.ttf"
//!
//! [surface]
//! width = 720.0
//! height = 1280.0
//!
//! [padding]
//! left = 48.0
//! right = 48.0
//!
//! [playback]
//! base_duration_ms = 30000.0
//! fps = 60
//!
//! [crawl]
//! angle = 60.0
//! text_color = "#ffc92a"
//! ```

use anyhow::{Context, Result};
use crawl_animation::DEFAULT_SCROLL_DURATION_MS;
use crawl_core::Insets;
use crawl_view::CrawlConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level application configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub padding: PaddingConfig,
    pub playback: PlaybackConfig,
    /// Track played alongside the crawl
    pub soundtrack: Option<PathBuf>,
    /// Font file for the crawl text
    pub font: Option<PathBuf>,
    /// Initial view values
    pub crawl: CrawlConfig,
}

/// Drawing surface size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaddingConfig {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl From<PaddingConfig> for Insets {
    fn from(p: PaddingConfig) -> Self {
        Insets::new(p.left, p.top, p.right, p.bottom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Duration of a full crawl in milliseconds
    pub base_duration_ms: f32,
    /// Frames per second for headless playback
    pub fps: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            fps: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_override_only_named_keys() {
        let config: AppConfig = toml::from_str(
            r#"
            soundtrack = "theme.ogg"

            [padding]
            left = 48.0

            [crawl]
            angle = 45.0
            "#,
        )
        .unwrap();

        assert_eq!(config.soundtrack, Some(PathBuf::from("theme.ogg")));
        assert_eq!(config.padding.left, 48.0);
        assert_eq!(config.padding.right, 0.0);
        assert_eq!(config.surface, SurfaceConfig::default());
        assert_eq!(config.playback.base_duration_ms, 30_000.0);
        assert_eq!(config.crawl.angle, 45.0);
        assert_eq!(config.crawl.end_scroll_multiplier, 2.0);
    }

    #[test]
    fn test_padding_to_insets() {
        let padding = PaddingConfig {
            left: 1.0,
            top: 2.0,
            right: 3.0,
            bottom: 4.0,
        };
        assert_eq!(Insets::from(padding), Insets::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_load_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/crawl.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/crawl.toml"));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
