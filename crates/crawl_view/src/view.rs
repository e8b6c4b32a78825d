//! The crawl view
//!
//! Owns the render state, the text and its paragraph layout, and the
//! viewport. Setters only record changes: numeric setters ignore changes of
//! `FLOAT_EPSILON` or less, and anything that affects line breaking marks the
//! layout dirty. The layout is rebuilt lazily right before drawing.

use crate::config::CrawlConfig;
use crate::error::Result;
use crate::renderer::{self, Viewport};
use crate::state::{update_float, RedrawSignal, RenderState};
use crawl_core::{Color, DrawContext, Insets, Size};
use crawl_text::{ParagraphLayout, TextLayoutEngine, Typeface};

/// A perspective text crawl
#[derive(Debug, Default)]
pub struct CrawlView {
    state: RenderState,
    text: String,
    layout: Option<ParagraphLayout>,
    layout_dirty: bool,
    viewport: Viewport,
    engine: TextLayoutEngine,
    redraw: RedrawSignal,
}

impl CrawlView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view with configured initial values
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        let mut view = Self::new();
        view.apply_config(config)?;
        Ok(view)
    }

    /// Apply configured values through the regular setters
    pub fn apply_config(&mut self, config: &CrawlConfig) -> Result<()> {
        let color = config.color()?;
        self.set_angle(config.angle);
        self.set_scroll_position(config.scroll_position);
        self.set_end_scroll_mult(config.end_scroll_multiplier);
        self.set_distance_from_text(config.distance_from_text);
        self.set_text_color(color);
        self.set_text_size(config.text_size);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last built layout
    ///
    /// Call [`recompute_if_dirty`](Self::recompute_if_dirty) first for a current one.
    pub fn layout(&self) -> Option<&ParagraphLayout> {
        self.layout.as_ref()
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn redraw_signal(&self) -> &RedrawSignal {
        &self.redraw
    }

    pub fn redraw_signal_mut(&mut self) -> &mut RedrawSignal {
        &mut self.redraw
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setters
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        self.invalidate_layout();
        true
    }

    pub fn set_angle(&mut self, angle: f32) -> bool {
        let changed = update_float(&mut self.state.angle, angle);
        self.redraw_if(changed)
    }

    /// Set the normalized scroll position, clamped to [0, 1]
    pub fn set_scroll_position(&mut self, position: f32) -> bool {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        let changed = update_float(&mut self.state.scroll_position, position);
        self.redraw_if(changed)
    }

    /// Set how many content heights the crawl keeps scrolling after the text
    ///
    /// Steeper angles need 2, 3 or more to scroll the text fully out of view.
    pub fn set_end_scroll_mult(&mut self, mult: f32) -> bool {
        let changed = update_float(&mut self.state.end_scroll_mult, mult);
        self.redraw_if(changed)
    }

    pub fn set_distance_from_text(&mut self, distance: f32) -> bool {
        let changed = update_float(&mut self.state.distance_from_text, distance);
        self.redraw_if(changed)
    }

    pub fn set_text_color(&mut self, color: Color) -> bool {
        if self.state.paint.color == color {
            return false;
        }
        self.state.paint.color = color;
        self.redraw_if(true)
    }

    /// Set the text size in pixels; non-positive sizes are ignored
    pub fn set_text_size(&mut self, size: f32) -> bool {
        if !size.is_finite() || size <= 0.0 {
            tracing::warn!("Ignoring text size {}", size);
            return false;
        }
        if !update_float(&mut self.state.paint.size, size) {
            return false;
        }
        self.invalidate_layout();
        true
    }

    pub fn set_typeface(&mut self, typeface: Typeface) -> bool {
        if self.state.paint.typeface == typeface {
            return false;
        }
        self.state.paint.typeface = typeface;
        self.invalidate_layout();
        true
    }

    pub fn set_padding(&mut self, padding: Insets) -> bool {
        if self.viewport.padding == padding {
            return false;
        }
        self.viewport.padding = padding;
        self.invalidate_layout();
        true
    }

    /// Track a new surface size
    pub fn on_surface_resized(&mut self, width: f32, height: f32) -> bool {
        let size = Size::new(width, height);
        if self.viewport.size == size {
            return false;
        }
        self.viewport.size = size;
        self.invalidate_layout();
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout and drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Rebuild the paragraph layout if anything it depends on changed
    ///
    /// Returns whether a rebuild happened.
    pub fn recompute_if_dirty(&mut self) -> bool {
        if !self.layout_dirty {
            return false;
        }
        self.layout_dirty = false;

        let width = self.viewport.content_rect().width();
        self.layout = self.engine.layout(&self.text, &self.state.paint, width);
        tracing::debug!(
            "Rebuilt crawl layout: {} lines at width {:.1}",
            self.layout.as_ref().map_or(0, |l| l.line_count()),
            width
        );
        true
    }

    /// Draw the current frame
    pub fn render(&mut self, ctx: &mut dyn DrawContext) {
        self.recompute_if_dirty();
        renderer::render(ctx, &self.state, self.layout.as_ref(), &self.viewport);
    }

    fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
        self.redraw.request();
    }

    fn redraw_if(&mut self, changed: bool) -> bool {
        if changed {
            self.redraw.request();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::RecordingContext;

    fn sized_view() -> CrawlView {
        let mut view = CrawlView::new();
        view.set_text_size(20.0);
        view.on_surface_resized(80.0, 500.0);
        view
    }

    #[test]
    fn test_repeated_setter_requests_one_redraw() {
        let mut view = CrawlView::new();

        assert!(view.set_angle(45.0));
        assert!(!view.set_angle(45.0));
        assert!(!view.set_angle(45.0005));
        assert_eq!(view.redraw_signal().requests(), 1);
    }

    #[test]
    fn test_every_setter_is_idempotent() {
        let mut view = CrawlView::new();

        for _ in 0..2 {
            view.set_scroll_position(0.5);
            view.set_end_scroll_mult(3.0);
            view.set_distance_from_text(40.0);
            view.set_text_size(24.0);
            view.set_text("A long time ago");
            view.set_text_color(Color::WHITE);
            view.on_surface_resized(320.0, 480.0);
        }

        assert_eq!(view.redraw_signal().requests(), 7);
    }

    #[test]
    fn test_scroll_position_is_clamped() {
        let mut view = CrawlView::new();

        assert!(!view.set_scroll_position(-0.5));
        assert_eq!(view.state().scroll_position, 0.0);

        assert!(view.set_scroll_position(1.7));
        assert_eq!(view.state().scroll_position, 1.0);
        assert!(!view.set_scroll_position(1.0));
    }

    #[test]
    fn test_distance_from_text_requests_redraw() {
        let mut view = CrawlView::new();
        assert!(view.set_distance_from_text(120.0));
        assert_eq!(view.state().distance_from_text, 120.0);
        assert!(view.redraw_signal().is_pending());
    }

    #[test]
    fn test_text_change_rebuilds_on_render() {
        let mut view = sized_view();
        view.set_text("A B C D E F G H");
        assert!(view.is_layout_dirty());

        let mut ctx = RecordingContext::new();
        view.render(&mut ctx);

        assert!(!view.is_layout_dirty());
        assert_eq!(view.layout().map(|l| l.line_count()), Some(2));
        assert_eq!(ctx.text_runs().count(), 2);
        assert!(!view.recompute_if_dirty());
    }

    #[test]
    fn test_same_text_is_a_no_op() {
        let mut view = sized_view();
        assert!(view.set_text("crawl"));
        view.recompute_if_dirty();
        assert!(!view.set_text("crawl"));
        assert!(!view.is_layout_dirty());
    }

    #[test]
    fn test_resize_uses_new_content_width() {
        let mut view = sized_view();
        view.set_text("A B C D E F G H");
        view.recompute_if_dirty();

        assert!(view.on_surface_resized(200.0, 500.0));
        view.recompute_if_dirty();
        assert_eq!(view.layout().map(|l| l.line_count()), Some(1));
        assert_eq!(view.layout().map(|l| l.width()), Some(200.0));
    }

    #[test]
    fn test_padding_narrows_layout() {
        let mut view = sized_view();
        view.on_surface_resized(200.0, 500.0);
        view.set_text("A B C D E F G H");
        view.set_padding(Insets::new(60.0, 0.0, 60.0, 0.0));
        view.recompute_if_dirty();

        assert_eq!(view.layout().map(|l| l.width()), Some(80.0));
        assert_eq!(view.layout().map(|l| l.line_count()), Some(2));
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let mut view = sized_view();
        let mut ctx = RecordingContext::new();
        view.render(&mut ctx);

        assert!(view.layout().is_none());
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_padding_wider_than_surface_has_no_layout() {
        let mut view = sized_view();
        view.set_text("crawl");
        view.set_padding(Insets::new(50.0, 0.0, 50.0, 0.0));
        view.recompute_if_dirty();
        assert!(view.layout().is_none());
    }

    #[test]
    fn test_text_size_invalidates_layout() {
        let mut view = sized_view();
        view.set_text("crawl");
        view.recompute_if_dirty();

        assert!(view.set_text_size(40.0));
        assert!(view.is_layout_dirty());
        assert!(!view.set_text_size(0.0));
        assert_eq!(view.state().paint.size, 40.0);
    }

    #[test]
    fn test_color_change_does_not_relayout() {
        let mut view = sized_view();
        view.set_text("crawl");
        view.recompute_if_dirty();

        assert!(view.set_text_color(Color::WHITE));
        assert!(!view.set_text_color(Color::WHITE));
        assert!(!view.is_layout_dirty());
    }

    #[test]
    fn test_from_config() {
        let config = CrawlConfig::from_toml(
            "angle = 30.0\nscroll_position = 0.5\ntext_color = \"#ffffff\"\n",
        )
        .unwrap();
        let view = CrawlView::from_config(&config).unwrap();

        assert_eq!(view.state().angle, 30.0);
        assert_eq!(view.state().scroll_position, 0.5);
        assert_eq!(view.state().end_scroll_mult, 2.0);
        assert_eq!(view.state().paint.color, Color::from_hex(0xffffff));
    }

    #[test]
    fn test_from_config_rejects_bad_color() {
        let config = CrawlConfig {
            text_color: "yellow".to_string(),
            ..Default::default()
        };
        assert!(CrawlView::from_config(&config).is_err());
    }
}
