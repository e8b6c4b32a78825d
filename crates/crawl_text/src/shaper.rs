//! Text shaping using rustybuzz (HarfBuzz)
//!
//! Converts text strings into positioned glyph sequences with proper
//! kerning and ligatures.

use crate::font::FontFace;
use rustybuzz::{Face, UnicodeBuffer};

/// Units per em used for estimated (font-less) shaping
const ESTIMATED_UNITS_PER_EM: u16 = 1000;

/// Estimated advance per character, in `ESTIMATED_UNITS_PER_EM` units
const ESTIMATED_ADVANCE: i32 = 550;

/// A shaped glyph with position information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph ID in the font (0 when shaped without a font)
    pub glyph_id: u16,
    /// X offset from current position (for combining marks, etc.)
    pub x_offset: i32,
    /// Horizontal advance to next glyph position
    pub x_advance: i32,
    /// Byte index in the original string (cluster)
    pub cluster: u32,
}

/// Result of shaping a text string
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedText {
    /// Shaped glyphs in visual order
    pub glyphs: Vec<ShapedGlyph>,
    /// Total advance width in font units
    pub total_advance: i32,
    /// Font size used for shaping reference
    pub font_size: f32,
    /// Units per em from the font
    pub units_per_em: u16,
}

impl ShapedText {
    /// Shape without a font: every character advances `0.55em`
    pub fn estimated(text: &str, font_size: f32) -> Self {
        let glyphs: Vec<ShapedGlyph> = text
            .char_indices()
            .map(|(cluster, _)| ShapedGlyph {
                glyph_id: 0,
                x_offset: 0,
                x_advance: ESTIMATED_ADVANCE,
                cluster: cluster as u32,
            })
            .collect();
        let total_advance = ESTIMATED_ADVANCE * glyphs.len() as i32;

        Self {
            glyphs,
            total_advance,
            font_size,
            units_per_em: ESTIMATED_UNITS_PER_EM,
        }
    }

    /// Get total width in pixels
    pub fn width_px(&self) -> f32 {
        self.scale(self.total_advance)
    }

    /// Scale a font-unit value to pixels
    pub fn scale(&self, value: i32) -> f32 {
        value as f32 * self.font_size / self.units_per_em as f32
    }
}

/// Text shaper using HarfBuzz via rustybuzz
#[derive(Debug, Default)]
pub struct TextShaper {}

impl TextShaper {
    pub fn new() -> Self {
        Self {}
    }

    /// Shape a text string using the given font
    pub fn shape(&self, text: &str, font_face: &FontFace, font_size: f32) -> ShapedText {
        let face = match Face::from_slice(font_face.data(), font_face.face_index()) {
            Some(f) => f,
            None => return self.fallback_shape(text, font_face, font_size),
        };

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);

        let output = rustybuzz::shape(&face, &[], buffer);

        let mut glyphs = Vec::with_capacity(output.len());
        let mut total_advance = 0i32;

        for (info, pos) in output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions().iter())
        {
            glyphs.push(ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_offset: pos.x_offset,
                x_advance: pos.x_advance,
                cluster: info.cluster,
            });
            total_advance += pos.x_advance;
        }

        ShapedText {
            glyphs,
            total_advance,
            font_size,
            units_per_em: font_face.metrics().units_per_em,
        }
    }

    /// Per-character shaping from the font's cmap/hmtx when rustybuzz can't load the face
    fn fallback_shape(&self, text: &str, font_face: &FontFace, font_size: f32) -> ShapedText {
        tracing::warn!(
            "rustybuzz could not load {}; shaping per character",
            font_face.family_name()
        );

        let mut glyphs = Vec::new();
        let mut total_advance = 0i32;

        for (cluster, c) in text.char_indices() {
            let glyph_id = font_face.glyph_id(c).unwrap_or(0);
            let advance = font_face.glyph_advance(glyph_id).unwrap_or(500) as i32;

            glyphs.push(ShapedGlyph {
                glyph_id,
                x_offset: 0,
                x_advance: advance,
                cluster: cluster as u32,
            });

            total_advance += advance;
        }

        ShapedText {
            glyphs,
            total_advance,
            font_size,
            units_per_em: font_face.metrics().units_per_em,
        }
    }
}
