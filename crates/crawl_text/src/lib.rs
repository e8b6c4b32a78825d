//! Text layout for the perspective crawl
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser)
//! - System font lookup (fontdb)
//! - Text shaping (HarfBuzz via rustybuzz)
//! - Paint descriptions (typeface, size, color)
//! - Paragraph layout (line breaking, centering, line spacing)

pub mod font;
pub mod layout;
pub mod paint;
pub mod registry;
pub mod shaper;

pub use font::{FontFace, FontMetrics};
pub use layout::{
    layout, Alignment, LayoutOptions, LineSpan, ParagraphLayout, PositionedGlyph,
    TextLayoutEngine, LINE_SPACING_ADD, LINE_SPACING_MULT,
};
pub use paint::{LineMetrics, TextPaint, Typeface};
pub use registry::load_system_face;
pub use shaper::{ShapedGlyph, ShapedText, TextShaper};

use thiserror::Error;

/// Text errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("No system font matches {0:?}")]
    FontNotFound(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
