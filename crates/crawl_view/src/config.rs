//! Crawl view configuration
//!
//! Loaded from TOML; every key is optional and falls back to the view's
//! defaults:
//!
//! ```toml
//! angle = 60.0
//! scroll_position = 0.0
//! end_scroll_multiplier = 2.0
//! distance_from_text = 0.0
//! text_color = "#ffc92a"
//! text_size = 32.0
//! ```

use crate::error::{CrawlError, Result};
use crate::state::{DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SIZE};
use crawl_core::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Initial values for a crawl view
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Tilt in degrees
    pub angle: f32,
    pub scroll_position: f32,
    pub end_scroll_multiplier: f32,
    pub distance_from_text: f32,
    /// `#RRGGBB` or `#AARRGGBB`
    pub text_color: String,
    pub text_size: f32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            angle: 60.0,
            scroll_position: 0.0,
            end_scroll_multiplier: 2.0,
            distance_from_text: 0.0,
            text_color: format!("#{:06x}", DEFAULT_TEXT_COLOR),
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl CrawlConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CrawlError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// The configured text color
    pub fn color(&self) -> Result<Color> {
        parse_color(&self.text_color)
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB`
pub fn parse_color(value: &str) -> Result<Color> {
    let invalid = || CrawlError::InvalidColor(value.to_string());

    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

    match hex.len() {
        6 => Ok(Color::from_hex(packed)),
        8 => Ok(Color::from_argb(packed)),
        _ => Err(invalid()),
    }
}
