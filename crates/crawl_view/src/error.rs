//! Error types for crawl_view

use thiserror::Error;

/// Errors raised while configuring a crawl view
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Failed to read a configuration file
    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Color string that isn't `#RRGGBB` or `#AARRGGBB`
    #[error("Invalid color {0:?}")]
    InvalidColor(String),
}

/// Result type for crawl_view operations
pub type Result<T> = std::result::Result<T, CrawlError>;
