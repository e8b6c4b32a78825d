//! Scrub bar
//!
//! Integer progress in `[0, max]`, mapped to a normalized scroll position.

/// Progress resolution of the scrub bar
pub const SCRUB_MAX: u32 = 100_000;

/// Something that happened to the scrub bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrubEvent {
    ProgressChanged { progress: u32, from_user: bool },
    TrackingStarted,
    TrackingStopped,
}

/// A seek bar with integer progress
#[derive(Clone, Debug, PartialEq)]
pub struct ScrubBar {
    progress: u32,
    max: u32,
    tracking: bool,
}

impl Default for ScrubBar {
    fn default() -> Self {
        Self::new(SCRUB_MAX)
    }
}

impl ScrubBar {
    pub fn new(max: u32) -> Self {
        Self {
            progress: 0,
            max: max.max(1),
            tracking: false,
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Progress as a fraction of `max`
    pub fn fraction(&self) -> f32 {
        self.progress as f32 / self.max as f32
    }

    /// Move to `progress`, clamped to `max`
    ///
    /// Returns the change event, or `None` if the progress didn't move.
    pub fn set_progress(&mut self, progress: u32, from_user: bool) -> Option<ScrubEvent> {
        let progress = progress.min(self.max);
        if progress == self.progress {
            return None;
        }
        self.progress = progress;
        Some(ScrubEvent::ProgressChanged {
            progress,
            from_user,
        })
    }

    pub fn start_tracking(&mut self) -> ScrubEvent {
        self.tracking = true;
        ScrubEvent::TrackingStarted
    }

    pub fn stop_tracking(&mut self) -> ScrubEvent {
        self.tracking = false;
        ScrubEvent::TrackingStopped
    }

    /// Whether the user is currently dragging
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}
