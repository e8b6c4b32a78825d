//! Linear tweens

use crate::values::Interpolate;

/// Linear interpolation from one value to another over a fixed duration
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    /// Duration in milliseconds
    duration_ms: f32,
    /// Elapsed time in milliseconds
    elapsed_ms: f32,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween; negative or non-finite durations complete immediately
    pub fn new(from: T, to: T, duration_ms: f32) -> Self {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Get progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        self.from.lerp(&self.to, self.progress())
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}
