//! Crawl playback controller
//!
//! Keeps the scroll animation, the scrub bar, the view and the soundtrack in
//! lockstep. The animation drives the scrub bar's integer progress and the
//! scrub bar drives the view, so dragging and playback share one path.
//!
//! A click toggles playback:
//! - not scrolling: start the animation from the current progress, and start
//!   the soundtrack the first time or toggle it afterwards
//! - scrolling: toggle the soundtrack and stop the animation
//!
//! Grabbing the scrub bar stops a running animation.

use crate::audio::AudioPlayer;
use crate::notify::{Notifier, PLAYER_ERROR};
use crate::scrub::{ScrubBar, ScrubEvent};
use crawl_animation::{AnimationEvent, ScrollAnimator};
use crawl_core::DrawContext;
use crawl_view::CrawlView;
use std::path::{Path, PathBuf};

/// Shown once when the controller starts
pub const START_HINT: &str = "Tap to start or pause";

/// Drives a [`CrawlView`] from user input, an animation and a soundtrack
pub struct CrawlController<P, N> {
    view: CrawlView,
    scrub: ScrubBar,
    animator: ScrollAnimator,
    player: P,
    notifier: N,
    soundtrack: Option<PathBuf>,
    scrolling: bool,
    music_started: bool,
}

impl<P: AudioPlayer, N: Notifier> CrawlController<P, N> {
    pub fn new(view: CrawlView, player: P, mut notifier: N) -> Self {
        notifier.notify(START_HINT);
        Self {
            view,
            scrub: ScrubBar::default(),
            animator: ScrollAnimator::default(),
            player,
            notifier,
            soundtrack: None,
            scrolling: false,
            music_started: false,
        }
    }

    /// Play `path` alongside the crawl
    pub fn with_soundtrack(mut self, path: impl Into<PathBuf>) -> Self {
        self.soundtrack = Some(path.into());
        self
    }

    /// Set how long a full crawl takes
    pub fn with_base_duration(mut self, base_duration_ms: f32) -> Self {
        self.animator = ScrollAnimator::new(base_duration_ms);
        self
    }

    pub fn view(&self) -> &CrawlView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CrawlView {
        &mut self.view
    }

    pub fn scrub(&self) -> &ScrubBar {
        &self.scrub
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn soundtrack(&self) -> Option<&Path> {
        self.soundtrack.as_deref()
    }

    /// Whether the scroll animation is driving the crawl
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Start or pause the crawl and its soundtrack
    pub fn on_click(&mut self) {
        if !self.scrolling {
            self.animate_scroll();
            if self.music_started {
                self.toggle_music();
            } else {
                self.play_music();
            }
        } else {
            self.toggle_music();
            self.stop_scroll_animation();
        }
    }

    /// Move the scrub bar as the user drags it
    pub fn scrub_to(&mut self, progress: u32) {
        if let Some(event) = self.scrub.set_progress(progress, true) {
            self.handle_scrub(event);
        }
    }

    pub fn start_tracking(&mut self) {
        let event = self.scrub.start_tracking();
        self.handle_scrub(event);
    }

    pub fn stop_tracking(&mut self) {
        let event = self.scrub.stop_tracking();
        self.handle_scrub(event);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame loop
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance the scroll animation by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) -> Option<AnimationEvent> {
        let tick = self.animator.tick(dt_ms)?;

        let progress = (tick.value * self.scrub.max() as f32).round() as u32;
        if let Some(event) = self.scrub.set_progress(progress, false) {
            self.handle_scrub(event);
        }

        if tick.event == Some(AnimationEvent::Finished) {
            self.scrolling = false;
        }
        tick.event
    }

    pub fn render(&mut self, ctx: &mut dyn DrawContext) {
        self.view.render(ctx);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_scrub(&mut self, event: ScrubEvent) {
        match event {
            ScrubEvent::ProgressChanged { progress, .. } => {
                self.view
                    .set_scroll_position(progress as f32 / self.scrub.max() as f32);
            }
            ScrubEvent::TrackingStarted => {
                if self.scrolling {
                    self.stop_scroll_animation();
                }
            }
            ScrubEvent::TrackingStopped => {}
        }
    }

    fn animate_scroll(&mut self) {
        self.scrolling = true;
        self.animator.start(self.scrub.fraction());
    }

    fn stop_scroll_animation(&mut self) {
        self.scrolling = false;
        self.animator.cancel();
    }

    fn play_music(&mut self) {
        let Some(track) = self.soundtrack.as_deref() else {
            tracing::debug!("No soundtrack configured");
            return;
        };

        match self.player.play(track) {
            Ok(()) => self.music_started = true,
            Err(e) => {
                tracing::warn!("Soundtrack failed: {}", e);
                self.notifier.notify(PLAYER_ERROR);
            }
        }
    }

    fn toggle_music(&mut self) {
        if !self.music_started {
            return;
        }
        if self.player.is_playing() {
            self.player.pause();
        } else if let Err(e) = self.player.resume() {
            tracing::warn!("Soundtrack failed to resume: {}", e);
            self.notifier.notify(PLAYER_ERROR);
        }
    }
}
