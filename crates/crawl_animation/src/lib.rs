//! Crawl Animation
//!
//! Time-driven values for the crawl. The host frame loop polls animations
//! with a frame delta; nothing here owns a clock or a thread.
//!
//! - **Interpolation**: the `Interpolate` trait for animatable values
//! - **Tweens**: linear interpolation between two values over a duration
//! - **Scroll**: the animator that drives scroll position to the end

pub mod scroll;
pub mod tween;
pub mod values;

pub use scroll::{AnimationEvent, ScrollAnimator, ScrollTick, DEFAULT_SCROLL_DURATION_MS};
pub use tween::Tween;
pub use values::Interpolate;
