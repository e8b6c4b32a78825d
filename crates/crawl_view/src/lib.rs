//! Crawl View
//!
//! The perspective scroll renderer and the view that owns its state.
//!
//! # Frame Pipeline
//!
//! 1. Setters on [`CrawlView`] update [`RenderState`] and request a redraw
//!    when a value actually changed
//! 2. Before drawing, a dirty paragraph layout is rebuilt for the current
//!    content width
//! 3. [`render`] tilts the content plane with a [`Camera3D`] projection,
//!    pivoted on the content center, then scrolls the layout through it
//!
//! # Example
//!
//! ```rust
//! use crawl_core::RecordingContext;
//! use crawl_view::CrawlView;
//!
//! let mut view = CrawlView::new();
//! view.on_surface_resized(400.0, 600.0);
//! view.set_text("A long time ago in a galaxy far, far away");
//! view.set_scroll_position(0.25);
//!
//! let mut ctx = RecordingContext::new();
//! view.render(&mut ctx);
//! assert!(ctx.text_runs().count() > 0);
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod renderer;
pub mod state;
pub mod view;

pub use camera::{Camera3D, CAMERA_LOCATION_Z};
pub use config::{parse_color, CrawlConfig};
pub use error::{CrawlError, Result};
pub use renderer::{frame_geometry, render, scroll_offset, FrameGeometry, Viewport};
pub use state::{RedrawSignal, RenderState, FLOAT_EPSILON};
pub use view::CrawlView;
