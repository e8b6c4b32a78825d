//! Draw Context - canvas-style rendering API
//!
//! The `DrawContext` trait is the seam between the crawl renderer and whatever
//! actually puts pixels on screen. It keeps a transform stack with canvas-style
//! save/restore, and draws text runs at a position.
//!
//! # Example
//!
//! ```rust
//! use crawl_core::{DrawContext, Point, RecordingContext, TextStyle, Transform};
//!
//! let mut ctx = RecordingContext::new();
//!
//! let saved = ctx.save();
//! ctx.push_transform(Transform::translate(10.0, 20.0));
//! ctx.draw_text("Hello", Point::new(0.0, 16.0), &TextStyle::new(16.0));
//! ctx.restore_to_count(saved);
//!
//! assert_eq!(ctx.save_count(), saved);
//! ```

use crate::geometry::{Affine2D, Color, Mat3, Point};

// ─────────────────────────────────────────────────────────────────────────────
// Transform Types
// ─────────────────────────────────────────────────────────────────────────────

/// A 2D transform, either affine or projective
#[derive(Clone, Debug, PartialEq)]
pub enum Transform {
    /// 2D affine transformation
    Affine2D(Affine2D),
    /// 2D projective transformation (perspective)
    Projective(Mat3),
}

impl Transform {
    /// Create a 2D translation
    pub fn translate(x: f32, y: f32) -> Self {
        Transform::Affine2D(Affine2D::translation(x, y))
    }

    /// Create a 2D scale around the origin (0, 0)
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform::Affine2D(Affine2D::scale(sx, sy))
    }

    /// Create identity transform
    pub fn identity() -> Self {
        Transform::Affine2D(Affine2D::IDENTITY)
    }

    /// Check if this transform carries a perspective row
    pub fn is_projective(&self) -> bool {
        matches!(self, Transform::Projective(m) if !m.is_affine())
    }

    /// Widen to a 3x3 homogeneous matrix
    pub fn to_mat3(&self) -> Mat3 {
        match self {
            Transform::Affine2D(a) => Mat3::from_affine(a),
            Transform::Projective(m) => *m,
        }
    }

    /// Concatenate (self * other): `other` applies first
    ///
    /// Stays affine when both sides are affine.
    pub fn then(&self, other: &Transform) -> Transform {
        match (self, other) {
            (Transform::Affine2D(a), Transform::Affine2D(b)) => Transform::Affine2D(a.then(b)),
            _ => Transform::Projective(self.to_mat3().mul(&other.to_mat3())),
        }
    }

    /// Map a point through the transform
    pub fn map_point(&self, point: Point) -> Option<Point> {
        match self {
            Transform::Affine2D(a) => Some(a.transform_point(point)),
            Transform::Projective(m) => m.map_point(point),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl From<Affine2D> for Transform {
    fn from(t: Affine2D) -> Self {
        Transform::Affine2D(t)
    }
}

impl From<Mat3> for Transform {
    fn from(t: Mat3) -> Self {
        Transform::Projective(t)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Style
// ─────────────────────────────────────────────────────────────────────────────

/// Text style for a single drawn run
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Antialiased glyph edges
    pub anti_alias: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
            anti_alias: true,
        }
    }
}

impl TextStyle {
    /// Create a new text style with font size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing interface the crawl renderer targets
///
/// Transforms pushed onto the stack concatenate with whatever transform is
/// already current, so content drawn by a caller nested inside another
/// context keeps the outer transform.
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // Transform Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push a transform onto the stack, concatenated with the current one
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Transform;

    // ─────────────────────────────────────────────────────────────────────────
    // State Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the current state, returning the save count before the call
    fn save(&mut self) -> usize;

    /// Restore states until the save count equals `count`
    fn restore_to_count(&mut self, count: usize);

    /// Number of saved states currently on the stack
    fn save_count(&self) -> usize;

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw a text run with its baseline origin at `origin`
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    PushTransform(Transform),
    PopTransform,
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
        /// Combined transform in effect when the run was drawn
        transform: Transform,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    /// Combined transforms; the bottom entry is the base transform
    transform_stack: Vec<Transform>,
    /// Transform stack depth at each save
    save_stack: Vec<usize>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new() -> Self {
        Self::with_base_transform(Transform::identity())
    }

    /// Create a recording context whose drawing starts under `base`
    pub fn with_base_transform(base: Transform) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![base],
            save_stack: Vec::new(),
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterate over recorded text runs
    pub fn text_runs(&self) -> impl Iterator<Item = (&str, Point, &Transform)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::DrawText {
                text,
                origin,
                transform,
                ..
            } => Some((text.as_str(), *origin, transform)),
            _ => None,
        })
    }

    /// Clear all recorded commands, keeping the base transform
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack.truncate(1);
        self.save_stack.clear();
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        let combined = self.current_transform().then(&transform);
        self.commands.push(DrawCommand::PushTransform(transform));
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        let floor = self.save_stack.last().copied().unwrap_or(1);
        if self.transform_stack.len() > floor {
            self.commands.push(DrawCommand::PopTransform);
            self.transform_stack.pop();
        } else {
            tracing::warn!("pop_transform with no transform pushed since the last save");
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().cloned().unwrap_or_default()
    }

    fn save(&mut self) -> usize {
        let count = self.save_stack.len();
        self.commands.push(DrawCommand::Save);
        self.save_stack.push(self.transform_stack.len());
        count
    }

    fn restore_to_count(&mut self, count: usize) {
        while self.save_stack.len() > count {
            if let Some(depth) = self.save_stack.pop() {
                while self.transform_stack.len() > depth {
                    self.commands.push(DrawCommand::PopTransform);
                    self.transform_stack.pop();
                }
                self.commands.push(DrawCommand::Restore);
            }
        }
    }

    fn save_count(&self) -> usize {
        self.save_stack.len()
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
            transform: self.current_transform(),
        });
    }
}
