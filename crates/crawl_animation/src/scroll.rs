//! Scroll animation driver
//!
//! Drives a normalized scroll position from wherever it currently is to 1.0.
//! The duration shrinks with the distance left, so resuming part-way keeps
//! the same scroll speed as a full run.
//!
//! ```rust
//! use crawl_animation::{AnimationEvent, ScrollAnimator};
//!
//! let mut animator = ScrollAnimator::new(1000.0);
//! assert_eq!(animator.start(0.5), 500.0);
//!
//! let tick = animator.tick(500.0).unwrap();
//! assert_eq!(tick.value, 1.0);
//! assert_eq!(tick.event, Some(AnimationEvent::Finished));
//! assert!(animator.tick(16.0).is_none());
//! ```

use crate::tween::Tween;

/// Duration of a full crawl, from position 0 to 1
pub const DEFAULT_SCROLL_DURATION_MS: f32 = 30_000.0;

/// Lifecycle events emitted by an animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The animation reached its end value on its own
    Finished,
}

/// Result of advancing the scroll animation by one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTick {
    /// Scroll position after this frame
    pub value: f32,
    pub event: Option<AnimationEvent>,
}

/// Animates scroll position to 1.0 at a constant speed
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    base_duration_ms: f32,
    tween: Option<Tween<f32>>,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DURATION_MS)
    }
}

impl ScrollAnimator {
    /// Create an animator whose full run (0 to 1) takes `base_duration_ms`
    pub fn new(base_duration_ms: f32) -> Self {
        Self {
            base_duration_ms: base_duration_ms.max(0.0),
            tween: None,
        }
    }

    pub fn base_duration_ms(&self) -> f32 {
        self.base_duration_ms
    }

    /// Duration of a run starting at `progress`
    pub fn duration_for(&self, progress: f32) -> f32 {
        self.base_duration_ms * (1.0 - progress.clamp(0.0, 1.0))
    }

    /// Start animating from `progress`, replacing any running animation
    ///
    /// Returns the duration of the new run in milliseconds.
    pub fn start(&mut self, progress: f32) -> f32 {
        let from = progress.clamp(0.0, 1.0);
        let duration = self.duration_for(from);
        tracing::debug!("Scroll animation from {:.3} over {:.0}ms", from, duration);
        self.tween = Some(Tween::new(from, 1.0, duration));
        duration
    }

    /// Advance by `dt_ms`
    ///
    /// Returns `None` when nothing is running. The tick that reaches the end
    /// carries `AnimationEvent::Finished` and stops the animator.
    pub fn tick(&mut self, dt_ms: f32) -> Option<ScrollTick> {
        let tween = self.tween.as_mut()?;
        tween.tick(dt_ms);

        let value = tween.value();
        if tween.is_finished() {
            self.tween = None;
            tracing::debug!("Scroll animation finished");
            return Some(ScrollTick {
                value,
                event: Some(AnimationEvent::Finished),
            });
        }

        Some(ScrollTick { value, event: None })
    }

    /// Stop where the animation currently is
    ///
    /// Returns whether an animation was running. No later tick produces a
    /// value or event for the cancelled run.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.tween.take().is_some();
        if was_running {
            tracing::debug!("Scroll animation cancelled");
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_scales_with_remaining_distance() {
        let animator = ScrollAnimator::default();

        assert_eq!(animator.duration_for(0.0), 30_000.0);
        assert!((animator.duration_for(0.4) - 18_000.0).abs() < 1e-2);
        assert_eq!(animator.duration_for(1.0), 0.0);
    }

    #[test]
    fn test_start_returns_duration() {
        let mut animator = ScrollAnimator::default();
        let duration = animator.start(0.4);

        assert!((duration - 18_000.0).abs() < 1e-2);
        assert!(animator.is_running());
    }

    #[test]
    fn test_linear_ticks() {
        let mut animator = ScrollAnimator::new(1000.0);
        animator.start(0.0);

        let tick = animator.tick(250.0).unwrap();
        assert!((tick.value - 0.25).abs() < 1e-4);
        assert_eq!(tick.event, None);
    }

    #[test]
    fn test_finished_emitted_once() {
        let mut animator = ScrollAnimator::new(1000.0);
        animator.start(0.0);

        let mut finished = 0;
        for _ in 0..100 {
            if let Some(tick) = animator.tick(16.0) {
                if tick.event == Some(AnimationEvent::Finished) {
                    finished += 1;
                    assert_eq!(tick.value, 1.0);
                }
            }
        }

        assert_eq!(finished, 1);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut animator = ScrollAnimator::new(1000.0);
        animator.start(0.0);
        animator.tick(100.0);

        assert!(animator.cancel());
        assert!(animator.tick(16.0).is_none());
        assert!(!animator.cancel());
    }

    #[test]
    fn test_start_at_end_completes_on_first_tick() {
        let mut animator = ScrollAnimator::default();
        assert_eq!(animator.start(1.0), 0.0);

        let tick = animator.tick(0.0).unwrap();
        assert_eq!(tick.value, 1.0);
        assert_eq!(tick.event, Some(AnimationEvent::Finished));
    }

    #[test]
    fn test_restart_replaces_running_animation() {
        let mut animator = ScrollAnimator::new(1000.0);
        animator.start(0.0);
        animator.tick(500.0);
        animator.start(0.9);

        let tick = animator.tick(50.0).unwrap();
        assert!((tick.value - 0.95).abs() < 1e-4);
    }
}
