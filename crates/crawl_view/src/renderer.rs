//! Perspective scroll renderer
//!
//! Per frame, the renderer:
//! 1. Takes the content box (surface minus padding) and its center
//! 2. Builds a camera projection that tilts the plane by the state's angle
//!    and pushes it back by its depth offset
//! 3. Pivots that projection on the content center
//! 4. Scrolls the paragraph up through it by the scroll position
//!
//! Nothing is cached between frames: geometry is recomputed from the current
//! state and viewport on every call.

use crate::camera::Camera3D;
use crate::state::RenderState;
use crawl_core::{DrawContext, Insets, Mat3, Point, Rect, Size, Transform};
use crawl_text::ParagraphLayout;

/// Surface size and the padding around the content box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub size: Size,
    pub padding: Insets,
}

impl Viewport {
    pub fn new(size: Size, padding: Insets) -> Self {
        Self { size, padding }
    }

    pub fn content_rect(&self) -> Rect {
        self.padding.content_rect(self.size)
    }
}

/// Geometry of one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Surface minus padding
    pub content: Rect,
    /// Pivot of the projection
    pub center: Point,
    /// Camera projection pivoted on `center`
    pub projection: Mat3,
    /// Vertical translation applied to the layout under the projection
    pub scroll_y: f32,
}

/// Vertical offset of the layout for a scroll position
///
/// At 0 the text starts just below the content box; at 1 it has moved up by
/// its own height plus `end_scroll_mult` content heights.
pub fn scroll_offset(
    content_height: f32,
    layout_height: f32,
    scroll_position: f32,
    end_scroll_mult: f32,
) -> f32 {
    content_height - scroll_position * (layout_height + end_scroll_mult * content_height)
}

/// Compute the projection and scroll translation for one frame
pub fn frame_geometry(
    state: &RenderState,
    viewport: &Viewport,
    layout_height: f32,
) -> FrameGeometry {
    let content = viewport.content_rect();
    let center = content.center();

    let mut camera = Camera3D::new();
    camera.save();
    camera.rotate_x(state.angle);
    camera.translate(0.0, 0.0, state.distance_from_text);
    let mut projection = camera.get_matrix();
    camera.restore();

    projection.pre_translate(-center.x, -center.y);
    projection.post_translate(center.x, center.y);

    let scroll_y = scroll_offset(
        content.height(),
        layout_height,
        state.scroll_position,
        state.end_scroll_mult,
    );

    tracing::trace!(
        "Frame geometry: center ({:.1}, {:.1}), scroll_y {:.1}",
        center.x,
        center.y,
        scroll_y
    );

    FrameGeometry {
        content,
        center,
        projection,
        scroll_y,
    }
}

/// Draw `layout` under the crawl projection
///
/// The projection concatenates onto whatever transform `ctx` already has,
/// and the context is restored to its prior save count before returning.
/// Does nothing without a layout.
pub fn render(
    ctx: &mut dyn DrawContext,
    state: &RenderState,
    layout: Option<&ParagraphLayout>,
    viewport: &Viewport,
) {
    let Some(layout) = layout else {
        return;
    };

    let geometry = frame_geometry(state, viewport, layout.height());

    let saved = ctx.save();
    ctx.push_transform(Transform::Projective(geometry.projection));
    ctx.push_transform(Transform::translate(0.0, geometry.scroll_y));
    layout.draw(ctx, &state.paint);
    ctx.restore_to_count(saved);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::{DrawCommand, RecordingContext};
    use crawl_text::{layout, TextPaint};

    fn paint() -> TextPaint {
        TextPaint::new(20.0, crawl_core::Color::WHITE)
    }

    fn state_at(position: f32) -> RenderState {
        RenderState {
            scroll_position: position,
            paint: paint(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scroll_offset_formula() {
        for &p in &[0.0f32, 0.25, 0.5, 0.9, 1.0] {
            let expected = 500.0 - p * (120.0 + 2.0 * 500.0);
            assert!((scroll_offset(500.0, 120.0, p, 2.0) - expected).abs() < 1e-3);
        }
        assert_eq!(scroll_offset(500.0, 120.0, 0.0, 2.0), 500.0);
    }

    #[test]
    fn test_zero_end_multiplier() {
        assert!((scroll_offset(500.0, 120.0, 1.0, 0.0) - 380.0).abs() < 1e-4);
    }

    #[test]
    fn test_end_to_end_scroll_range() {
        let layout = layout("A B C D E F G H", &paint(), 80.0).unwrap();
        assert_eq!(layout.line_count(), 2);
        let h = layout.height() / 2.2;
        let viewport = Viewport::new(Size::new(80.0, 500.0), Insets::ZERO);

        let start = frame_geometry(&state_at(0.0), &viewport, layout.height());
        let end = frame_geometry(&state_at(1.0), &viewport, layout.height());

        assert!((start.scroll_y - 500.0).abs() < 1e-3);
        assert!((end.scroll_y - (-500.0 - 2.2 * h)).abs() < 1e-3);
    }

    #[test]
    fn test_projection_pivots_on_content_center() {
        let padding = Insets::new(10.0, 20.0, 30.0, 40.0);
        let viewport = Viewport::new(Size::new(400.0, 600.0), padding);
        let geometry = frame_geometry(&RenderState::default(), &viewport, 100.0);

        assert_eq!(geometry.center, Point::new(190.0, 290.0));
        let mapped = geometry.projection.map_point(geometry.center).unwrap();
        assert!((mapped.x - 190.0).abs() < 1e-3);
        assert!((mapped.y - 290.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_moves_the_pivot() {
        let state = RenderState::default();
        let small_viewport = Viewport::new(Size::new(200.0, 200.0), Insets::ZERO);
        let large_viewport = Viewport::new(Size::new(800.0, 400.0), Insets::ZERO);
        let small = frame_geometry(&state, &small_viewport, 0.0);
        let large = frame_geometry(&state, &large_viewport, 0.0);

        assert_ne!(small.projection, large.projection);
        let mapped = large.projection.map_point(Point::new(400.0, 200.0)).unwrap();
        assert!((mapped.x - 400.0).abs() < 1e-3);
        assert!((mapped.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_depth_offset_shifts_the_center() {
        let state = RenderState {
            distance_from_text: 150.0,
            ..Default::default()
        };
        let viewport = Viewport::new(Size::new(400.0, 600.0), Insets::ZERO);
        let geometry = frame_geometry(&state, &viewport, 0.0);

        let mut camera = Camera3D::new();
        camera.rotate_x(state.angle);
        camera.translate(0.0, 0.0, state.distance_from_text);
        let shift = camera.get_matrix().map_point(Point::ZERO).unwrap();

        let mapped = geometry.projection.map_point(geometry.center).unwrap();
        assert!((mapped.x - geometry.center.x - shift.x).abs() < 1e-2);
        assert!((mapped.y - geometry.center.y - shift.y).abs() < 1e-2);
    }

    #[test]
    fn test_render_without_layout_is_a_no_op() {
        let mut ctx = RecordingContext::new();
        let viewport = Viewport::new(Size::new(100.0, 100.0), Insets::ZERO);
        render(&mut ctx, &RenderState::default(), None, &viewport);

        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_render_draws_lines_under_projection() {
        let layout = layout("A B C D E F G H", &paint(), 80.0).unwrap();
        let viewport = Viewport::new(Size::new(80.0, 500.0), Insets::ZERO);
        let state = state_at(0.5);
        let geometry = frame_geometry(&state, &viewport, layout.height());

        let mut ctx = RecordingContext::new();
        render(&mut ctx, &state, Some(&layout), &viewport);

        let expected = Transform::Projective(geometry.projection)
            .then(&Transform::translate(0.0, geometry.scroll_y));
        let runs: Vec<_> = ctx.text_runs().collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "A B C D");
        assert_eq!(runs[1].0, "E F G H");
        assert_eq!(runs[0].2, &expected);

        assert_eq!(ctx.commands().first(), Some(&DrawCommand::Save));
        assert_eq!(ctx.commands().last(), Some(&DrawCommand::Restore));
        assert_eq!(ctx.save_count(), 0);
    }

    #[test]
    fn test_render_keeps_existing_transform() {
        let layout = layout("crawl", &paint(), 200.0).unwrap();
        let viewport = Viewport::new(Size::new(200.0, 200.0), Insets::ZERO);
        let state = state_at(0.0);
        let base = Transform::translate(0.0, 30.0);

        let mut ctx = RecordingContext::with_base_transform(base.clone());
        render(&mut ctx, &state, Some(&layout), &viewport);

        let geometry = frame_geometry(&state, &viewport, layout.height());
        let expected = base
            .then(&Transform::Projective(geometry.projection))
            .then(&Transform::translate(0.0, geometry.scroll_y));
        let (_, _, transform) = ctx.text_runs().next().unwrap();
        assert_eq!(transform, &expected);
        assert_eq!(ctx.current_transform(), base);
    }
}
