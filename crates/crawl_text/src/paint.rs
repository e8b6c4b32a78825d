//! Text paint
//!
//! What the layout engine measures with and the renderer draws with: a
//! typeface, a size and a color.

use crate::font::FontFace;
use crate::shaper::{ShapedText, TextShaper};
use crawl_core::{Color, TextStyle};
use std::sync::Arc;

/// Estimated ascent as a fraction of the font size
const FALLBACK_ASCENT: f32 = 0.8;
/// Estimated descent as a fraction of the font size
const FALLBACK_DESCENT: f32 = 0.2;

/// The face text is measured and shaped with
#[derive(Clone, Debug, Default)]
pub enum Typeface {
    /// Deterministic estimated metrics, used when no font is loaded
    #[default]
    Fallback,
    /// A parsed font face
    Face(Arc<FontFace>),
}

impl PartialEq for Typeface {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Typeface::Fallback, Typeface::Fallback) => true,
            (Typeface::Face(a), Typeface::Face(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Vertical metrics at a given size, in pixels
///
/// `descent` and `bottom` are positive distances below the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    /// Extent of the tallest glyph above the baseline
    pub top: f32,
    /// Extent of the lowest glyph below the baseline
    pub bottom: f32,
}

impl LineMetrics {
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

impl Typeface {
    /// Vertical metrics at `size` pixels
    pub fn line_metrics(&self, size: f32) -> LineMetrics {
        match self {
            Typeface::Fallback => {
                let ascent = FALLBACK_ASCENT * size;
                let descent = FALLBACK_DESCENT * size;
                LineMetrics {
                    ascent,
                    descent,
                    top: ascent,
                    bottom: descent,
                }
            }
            Typeface::Face(face) => {
                let m = face.metrics();
                let ascent = m.ascender_px(size);
                let descent = -m.descender_px(size);
                LineMetrics {
                    ascent,
                    descent,
                    top: m.scale(m.y_max, size).max(ascent),
                    bottom: (-m.scale(m.y_min, size)).max(descent),
                }
            }
        }
    }

    /// Shape `text` at `size` pixels
    pub fn shape(&self, shaper: &TextShaper, text: &str, size: f32) -> ShapedText {
        match self {
            Typeface::Fallback => ShapedText::estimated(text, size),
            Typeface::Face(face) => shaper.shape(text, face, size),
        }
    }
}

/// Paint used to lay out and draw the crawl text
#[derive(Clone, Debug, PartialEq)]
pub struct TextPaint {
    pub color: Color,
    /// Font size in pixels
    pub size: f32,
    pub typeface: Typeface,
    pub anti_alias: bool,
}

impl Default for TextPaint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 14.0,
            typeface: Typeface::Fallback,
            anti_alias: true,
        }
    }
}

impl TextPaint {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            ..Default::default()
        }
    }

    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = typeface;
        self
    }

    /// Style handed to the draw context for each run
    pub fn style(&self) -> TextStyle {
        TextStyle {
            size: self.size,
            color: self.color,
            anti_alias: self.anti_alias,
        }
    }
}
