//! Paragraph layout
//!
//! Breaks text into lines that fit an available width, aligns each line and
//! stacks them with a fixed spacing multiplier. The result is a pure function
//! of (text, paint, width): identical inputs compare equal.
//!
//! Line breaking is greedy over UAX #14 break opportunities. Trailing
//! whitespace hangs past the line end and does not count toward its width.
//! A word that cannot fit on a line of its own is split between characters.

use crate::paint::{LineMetrics, TextPaint};
use crate::shaper::{ShapedText, TextShaper};
use crawl_core::{DrawContext, Point};
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Line height multiplier applied to every line
pub const LINE_SPACING_MULT: f32 = 1.1;

/// Extra spacing added to every line, in pixels
pub const LINE_SPACING_ADD: f32 = 0.0;

/// Horizontal alignment of each line within the layout width
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Layout parameters that don't come from the paint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    pub alignment: Alignment,
    pub spacing_mult: f32,
    pub spacing_add: f32,
    /// Reserve room for glyphs that reach past the ascent/descent
    pub include_pad: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            alignment: Alignment::Center,
            spacing_mult: LINE_SPACING_MULT,
            spacing_add: LINE_SPACING_ADD,
            include_pad: true,
        }
    }
}

/// A glyph placed relative to the start of its line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    pub glyph_id: u16,
    pub x: f32,
    /// Byte offset into the laid-out text
    pub cluster: usize,
}

/// One laid-out line
#[derive(Clone, Debug, PartialEq)]
pub struct LineSpan {
    /// Byte range in the source text, including hanging whitespace
    pub range: Range<usize>,
    /// Display text, without hanging whitespace or line terminators
    pub text: String,
    pub top: f32,
    pub baseline: f32,
    pub bottom: f32,
    /// Left edge after alignment
    pub x: f32,
    /// Width excluding hanging whitespace
    pub width: f32,
    pub glyphs: Vec<PositionedGlyph>,
}

/// A wrapped, aligned paragraph with a known height
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphLayout {
    lines: Vec<LineSpan>,
    height: f32,
    width: f32,
    alignment: Alignment,
    font_size: f32,
}

impl ParagraphLayout {
    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total rendered height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width the paragraph was laid out in
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Draw each non-blank line at `(line.x, line.baseline)`
    pub fn draw(&self, ctx: &mut dyn DrawContext, paint: &TextPaint) {
        let style = paint.style();
        for line in self.lines.iter().filter(|l| !l.text.is_empty()) {
            ctx.draw_text(&line.text, Point::new(line.x, line.baseline), &style);
        }
    }
}

/// Lay out `text` with the default options
///
/// Returns `None` for empty text or a width that is not positive and finite.
pub fn layout(text: &str, paint: &TextPaint, available_width: f32) -> Option<ParagraphLayout> {
    TextLayoutEngine::new().layout(text, paint, available_width)
}

/// Paragraph layout engine
#[derive(Debug, Default)]
pub struct TextLayoutEngine {
    shaper: TextShaper,
    options: LayoutOptions,
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            shaper: TextShaper::new(),
            options,
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out `text` within `available_width`
    pub fn layout(
        &self,
        text: &str,
        paint: &TextPaint,
        available_width: f32,
    ) -> Option<ParagraphLayout> {
        let metrics = paint.typeface.line_metrics(paint.size);
        self.layout_with_metrics(text, paint, metrics, available_width)
    }

    /// Lay out `text` with explicit line metrics instead of the typeface's
    fn layout_with_metrics(
        &self,
        text: &str,
        paint: &TextPaint,
        metrics: LineMetrics,
        available_width: f32,
    ) -> Option<ParagraphLayout> {
        if text.is_empty() || !available_width.is_finite() || available_width <= 0.0 {
            return None;
        }

        let spacing = metrics.line_height() * self.options.spacing_mult + self.options.spacing_add;
        let (pad_top, pad_bottom) = if self.options.include_pad {
            (metrics.top - metrics.ascent, metrics.bottom - metrics.descent)
        } else {
            (0.0, 0.0)
        };

        let mut lines = Vec::new();
        for segment in hard_segments(text) {
            let content = &text[segment.clone()];
            let shaped = paint.typeface.shape(&self.shaper, content, paint.size);
            let advances = Advances::new(&shaped, content.len());

            for range in break_lines(content, &advances, available_width) {
                let visible_end = range.start + content[range.clone()].trim_end().len();
                let width = advances.width(range.start, visible_end);
                let x = match self.options.alignment {
                    Alignment::Left => 0.0,
                    Alignment::Center => (available_width - width) / 2.0,
                    Alignment::Right => available_width - width,
                };

                let index = lines.len();
                let line_top = pad_top + index as f32 * spacing;
                lines.push(LineSpan {
                    range: segment.start + range.start..segment.start + range.end,
                    text: content[range.start..visible_end].to_string(),
                    top: if index == 0 { 0.0 } else { line_top },
                    baseline: line_top + metrics.ascent,
                    bottom: line_top + spacing,
                    x,
                    width,
                    glyphs: position_glyphs(&shaped, &range, segment.start),
                });
            }
        }

        if let Some(last) = lines.last_mut() {
            last.bottom += pad_bottom;
        }
        let height = pad_top + lines.len() as f32 * spacing + pad_bottom;

        tracing::debug!(
            "Laid out {} lines, height {:.1} at width {:.1}",
            lines.len(),
            height,
            available_width
        );

        Some(ParagraphLayout {
            lines,
            height,
            width: available_width,
            alignment: self.options.alignment,
            font_size: paint.size,
        })
    }
}

/// Pixel advance prefix sums indexed by byte offset
struct Advances {
    prefix: Vec<f32>,
}

impl Advances {
    fn new(shaped: &ShapedText, len: usize) -> Self {
        let mut per_byte = vec![0.0f32; len + 1];
        for glyph in &shaped.glyphs {
            let cluster = (glyph.cluster as usize).min(len);
            per_byte[cluster] += shaped.scale(glyph.x_advance);
        }

        let mut prefix = Vec::with_capacity(len + 1);
        let mut sum = 0.0;
        prefix.push(0.0);
        for advance in &per_byte[..len] {
            sum += advance;
            prefix.push(sum);
        }
        Self { prefix }
    }

    fn width(&self, start: usize, end: usize) -> f32 {
        self.prefix[end] - self.prefix[start]
    }
}

/// Byte ranges between mandatory breaks, without their line terminators
fn hard_segments(text: &str) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (pos, opportunity) in linebreaks(text) {
        if opportunity != BreakOpportunity::Mandatory {
            continue;
        }
        let content = text[start..pos].trim_end_matches(is_line_terminator);
        segments.push(start..start + content.len());
        start = pos;
    }

    // A trailing terminator opens one more, empty line
    if text.ends_with(is_line_terminator) {
        segments.push(text.len()..text.len());
    }
    segments
}

fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Greedy line breaking of a single hard segment
fn break_lines(segment: &str, advances: &Advances, max_width: f32) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut piece_start = 0;

    for (pos, _) in linebreaks(segment) {
        if pos <= piece_start {
            continue;
        }
        let visible_end = piece_start + segment[piece_start..pos].trim_end().len();

        if line_start < piece_start && advances.width(line_start, visible_end) > max_width {
            lines.push(line_start..piece_start);
            line_start = piece_start;
        }
        if advances.width(line_start, visible_end) > max_width {
            line_start = split_overlong(
                segment,
                advances,
                line_start,
                visible_end,
                max_width,
                &mut lines,
            );
        }
        piece_start = pos;
    }

    lines.push(line_start..segment.len());
    lines
}

/// Split `start..end` between characters, returning the start of the unfinished tail
fn split_overlong(
    segment: &str,
    advances: &Advances,
    start: usize,
    end: usize,
    max_width: f32,
    lines: &mut Vec<Range<usize>>,
) -> usize {
    let mut line_start = start;
    for (offset, c) in segment[start..end].char_indices() {
        let char_start = start + offset;
        let char_end = char_start + c.len_utf8();
        if char_start > line_start && advances.width(line_start, char_end) > max_width {
            lines.push(line_start..char_start);
            line_start = char_start;
        }
    }
    line_start
}

fn position_glyphs(shaped: &ShapedText, range: &Range<usize>, base: usize) -> Vec<PositionedGlyph> {
    let mut pen = 0.0;
    shaped
        .glyphs
        .iter()
        .filter(|g| range.contains(&(g.cluster as usize)))
        .map(|g| {
            let glyph = PositionedGlyph {
                glyph_id: g.glyph_id,
                x: pen + shaped.scale(g.x_offset),
                cluster: base + g.cluster as usize,
            };
            pen += shaped.scale(g.x_advance);
            glyph
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Typeface;
    use crate::registry::load_system_face;
    use crawl_core::{Color, DrawCommand, RecordingContext};

    fn paint() -> TextPaint {
        // Fallback typeface: 11px per character, 20px line height
        TextPaint::new(20.0, Color::WHITE)
    }

    fn texts(layout: &ParagraphLayout) -> Vec<&str> {
        layout.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_wraps_and_centers() {
        let layout = layout("A B C D E F G H", &paint(), 80.0).unwrap();

        assert_eq!(texts(&layout), vec!["A B C D", "E F G H"]);
        for line in layout.lines() {
            assert!((line.width - 77.0).abs() < 1e-4);
            assert!((line.x - 1.5).abs() < 1e-4);
        }
        assert!((layout.height() - 44.0).abs() < 1e-4);
        assert_eq!(layout.width(), 80.0);
    }

    #[test]
    fn test_line_ranges_and_baselines() {
        let layout = layout("A B C D E F G H", &paint(), 80.0).unwrap();
        let lines = layout.lines();

        assert_eq!(lines[0].range, 0..8);
        assert_eq!(lines[1].range, 8..15);
        assert!((lines[0].baseline - 16.0).abs() < 1e-4);
        assert!((lines[1].baseline - 38.0).abs() < 1e-4);
        assert!((lines[1].top - 22.0).abs() < 1e-4);
        assert!((lines[1].bottom - 44.0).abs() < 1e-4);
    }

    /// Glyphs reaching 3px above the ascent and 2px below the descent
    fn padded_metrics() -> LineMetrics {
        LineMetrics {
            ascent: 16.0,
            descent: 4.0,
            top: 19.0,
            bottom: 6.0,
        }
    }

    #[test]
    fn test_include_pad_shifts_lines_and_extends_height() {
        let engine = TextLayoutEngine::new();
        let layout = engine
            .layout_with_metrics("A B C D E F G H", &paint(), padded_metrics(), 80.0)
            .unwrap();
        let lines = layout.lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].top, 0.0);
        assert!((lines[0].baseline - 19.0).abs() < 1e-4);
        assert!((lines[0].bottom - 25.0).abs() < 1e-4);
        assert!((lines[1].top - 25.0).abs() < 1e-4);
        assert!((lines[1].baseline - 41.0).abs() < 1e-4);
        // Bottom pad lands on the last line only
        assert!((lines[1].bottom - 49.0).abs() < 1e-4);
        assert!((layout.height() - 49.0).abs() < 1e-4);
    }

    #[test]
    fn test_without_include_pad_ignores_glyph_extents() {
        let engine = TextLayoutEngine::with_options(LayoutOptions {
            include_pad: false,
            ..Default::default()
        });
        let layout = engine
            .layout_with_metrics("A B C D E F G H", &paint(), padded_metrics(), 80.0)
            .unwrap();
        let lines = layout.lines();

        assert!((lines[0].baseline - 16.0).abs() < 1e-4);
        assert!((lines[1].bottom - 44.0).abs() < 1e-4);
        assert!((layout.height() - 44.0).abs() < 1e-4);
    }

    #[test]
    fn test_system_font_layout() {
        // Hosts without any installed font only have the estimated metrics
        let Ok(face) = load_system_face(None) else {
            return;
        };
        let paint = paint().with_typeface(Typeface::Face(face));
        let metrics = paint.typeface.line_metrics(paint.size);
        let pad_top = metrics.top - metrics.ascent;
        let pad_bottom = metrics.bottom - metrics.descent;
        assert!(pad_top >= 0.0 && pad_bottom >= 0.0);

        let text = "Rebel spies managed to steal secret plans to the Empire's ultimate weapon";
        let layout = layout(text, &paint, 120.0).unwrap();
        let lines = layout.lines();
        let spacing = metrics.line_height() * LINE_SPACING_MULT;

        assert!(lines.len() > 1);
        assert!((lines[0].baseline - metrics.top).abs() < 1e-3);
        let expected = pad_top + lines.len() as f32 * spacing + pad_bottom;
        assert!((layout.height() - expected).abs() < 1e-3);
        assert!((lines[lines.len() - 1].bottom - layout.height()).abs() < 1e-3);
        for line in lines {
            assert!(line.width <= 120.0 + 1e-3, "{:?} is too wide", line.text);
        }
        assert!(lines[0].glyphs.iter().any(|g| g.glyph_id != 0));

        assert_eq!(Some(layout), super::layout(text, &paint, 120.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(layout("", &paint(), 100.0).is_none());
        assert!(layout("text", &paint(), 0.0).is_none());
        assert!(layout("text", &paint(), -10.0).is_none());
        assert!(layout("text", &paint(), f32::NAN).is_none());
    }

    #[test]
    fn test_mandatory_breaks_keep_blank_lines() {
        let layout = layout("one\n\ntwo", &paint(), 500.0).unwrap();

        assert_eq!(texts(&layout), vec!["one", "", "two"]);
        assert!((layout.height() - 3.0 * 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let layout = layout("end\n", &paint(), 500.0).unwrap();
        assert_eq!(texts(&layout), vec!["end", ""]);
    }

    #[test]
    fn test_overlong_word_splits_between_characters() {
        let layout = layout("ABCDEFGHIJ", &paint(), 50.0).unwrap();
        assert_eq!(texts(&layout), vec!["ABCD", "EFGH", "IJ"]);
    }

    #[test]
    fn test_every_line_holds_a_character() {
        let layout = layout("ABC", &paint(), 5.0).unwrap();
        assert_eq!(texts(&layout), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_trailing_whitespace_hangs() {
        let layout = layout("AAA BBB", &paint(), 33.0).unwrap();
        let lines = layout.lines();

        assert_eq!(texts(&layout), vec!["AAA", "BBB"]);
        assert_eq!(lines[0].range, 0..4);
        assert!((lines[0].width - 33.0).abs() < 1e-4);
        assert!(lines[0].x.abs() < 1e-4);
    }

    #[test]
    fn test_deterministic() {
        let text = "It is a period of civil war. Rebel spaceships, striking from a hidden base.";
        let a = layout(text, &paint(), 240.0);
        let b = layout(text, &paint(), 240.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_width_never_exceeds_available() {
        let text = "Rebel spies managed to steal secret plans to the Empire's ultimate weapon";
        let layout = layout(text, &paint(), 120.0).unwrap();

        assert!(layout.width() <= 120.0);
        for line in layout.lines() {
            assert!(line.width <= 120.0 + 1e-4, "{:?} is too wide", line.text);
        }
    }

    #[test]
    fn test_left_alignment() {
        let engine = TextLayoutEngine::with_options(LayoutOptions {
            alignment: Alignment::Left,
            ..Default::default()
        });
        let layout = engine.layout("A B", &paint(), 100.0).unwrap();
        assert_eq!(layout.lines()[0].x, 0.0);
    }

    #[test]
    fn test_glyphs_are_positioned_per_line() {
        let layout = layout("A B C D E F G H", &paint(), 80.0).unwrap();
        let second = &layout.lines()[1];

        assert_eq!(second.glyphs.first().map(|g| g.cluster), Some(8));
        assert!((second.glyphs[2].x - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_draw_issues_one_run_per_line() {
        let layout = layout("one\n\ntwo", &paint(), 500.0).unwrap();
        let mut ctx = RecordingContext::new();
        layout.draw(&mut ctx, &paint());

        let runs: Vec<_> = ctx.text_runs().collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].0, "two");
        assert!((runs[1].1.y - (44.0 + 16.0)).abs() < 1e-4);
        assert!(matches!(ctx.commands()[0], DrawCommand::DrawText { .. }));
    }
}
