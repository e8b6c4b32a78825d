//! Crawl App
//!
//! Host glue around a [`crawl_view::CrawlView`]:
//!
//! - [`ScrubBar`]: integer progress control the user can drag
//! - [`AudioPlayer`]: the soundtrack that plays in lockstep with the crawl
//! - [`Notifier`]: short user-visible messages
//! - [`CrawlController`]: wires clicks, scrubbing, the scroll animation and
//!   audio together
//! - [`AppConfig`]: surface, padding, playback and resource settings

pub mod audio;
pub mod config;
pub mod controller;
pub mod notify;
pub mod scrub;

pub use audio::{AudioError, AudioPlayer, HeadlessPlayer};
pub use config::{AppConfig, PaddingConfig, PlaybackConfig, SurfaceConfig};
pub use controller::{CrawlController, START_HINT};
pub use notify::{LogNotifier, Notifier, PLAYER_ERROR};
pub use scrub::{ScrubBar, ScrubEvent, SCRUB_MAX};
