//! Render state and redraw requests

use crawl_core::Color;
use crawl_text::TextPaint;
use std::fmt;

/// Changes at or below this size are ignored
pub const FLOAT_EPSILON: f32 = 0.001;

/// Default crawl text color (`#ffc92a`)
pub const DEFAULT_TEXT_COLOR: u32 = 0xffc92a;

/// Default crawl text size in pixels
pub const DEFAULT_TEXT_SIZE: f32 = 32.0;

/// Everything the renderer reads besides the layout and viewport
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    /// Tilt about the horizontal axis, in degrees
    pub angle: f32,
    /// Normalized scroll position in [0, 1]
    pub scroll_position: f32,
    /// Content heights to keep scrolling after the text has passed
    pub end_scroll_mult: f32,
    /// Camera depth offset
    pub distance_from_text: f32,
    /// Text color, size and typeface
    pub paint: TextPaint,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            angle: 60.0,
            scroll_position: 0.0,
            end_scroll_mult: 2.0,
            distance_from_text: 0.0,
            paint: TextPaint::new(DEFAULT_TEXT_SIZE, Color::from_hex(DEFAULT_TEXT_COLOR)),
        }
    }
}

/// Store `value` in `slot` if it differs by more than `FLOAT_EPSILON`
pub(crate) fn update_float(slot: &mut f32, value: f32) -> bool {
    if (*slot - value).abs() > FLOAT_EPSILON {
        *slot = value;
        true
    } else {
        false
    }
}

/// Redraw requests from the view to its host
///
/// The host either polls [`take_pending`](Self::take_pending) once per frame
/// or installs a wake callback that runs on every request.
#[derive(Default)]
pub struct RedrawSignal {
    pending: bool,
    requests: u64,
    waker: Option<Box<dyn FnMut()>>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `waker` on every redraw request
    pub fn set_waker(&mut self, waker: impl FnMut() + 'static) {
        self.waker = Some(Box::new(waker));
    }

    pub fn request(&mut self) {
        self.pending = true;
        self.requests += 1;
        if let Some(waker) = self.waker.as_mut() {
            waker();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear the pending flag, returning whether it was set
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total requests since creation
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl fmt::Debug for RedrawSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedrawSignal")
            .field("pending", &self.pending)
            .field("requests", &self.requests)
            .field("waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let state = RenderState::default();
        assert_eq!(state.angle, 60.0);
        assert_eq!(state.scroll_position, 0.0);
        assert_eq!(state.end_scroll_mult, 2.0);
        assert_eq!(state.distance_from_text, 0.0);
        assert_eq!(state.paint.size, 32.0);
        assert_eq!(state.paint.color, Color::from_hex(0xffc92a));
    }

    #[test]
    fn test_update_float_epsilon() {
        let mut value = 1.0;
        assert!(!update_float(&mut value, 1.0005));
        assert_eq!(value, 1.0);
        assert!(update_float(&mut value, 1.01));
        assert_eq!(value, 1.01);
    }

    #[test]
    fn test_redraw_signal() {
        let mut signal = RedrawSignal::new();
        assert!(!signal.take_pending());

        signal.request();
        signal.request();
        assert_eq!(signal.requests(), 2);
        assert!(signal.take_pending());
        assert!(!signal.is_pending());
    }

    #[test]
    fn test_waker_runs_per_request() {
        let woken = Rc::new(Cell::new(0));
        let counter = Rc::clone(&woken);

        let mut signal = RedrawSignal::new();
        signal.set_waker(move || counter.set(counter.get() + 1));
        signal.request();

        assert_eq!(woken.get(), 1);
    }
}
