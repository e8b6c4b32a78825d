//! Crawl Core
//!
//! Foundational types for the perspective text crawl:
//!
//! - **Geometry**: points, sizes, rectangles, padding insets and colors
//! - **Matrices**: affine, projective (3x3) and 3D (4x4) transforms
//! - **Draw Context**: canvas-style transform stack with save/restore, and a
//!   recording implementation for deferred execution and inspection

pub mod draw;
pub mod geometry;

pub use draw::{DrawCommand, DrawContext, RecordingContext, TextStyle, Transform};
pub use geometry::{Affine2D, Color, Insets, Mat3, Mat4, Point, Rect, Size, Vec3};
