//! Frame-coherent pointer state.
//!
//! Accumulates winit mouse events between frames and attributes drag motion
//! to the navigation gesture it belongs to: primary drag orbits, secondary
//! drag pans, the wheel zooms. Call
//! [`clear_transients`](PointerState::clear_transients) once per frame after
//! the controller has consumed the deltas.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Per-frame pointer input for the orbit controller.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    orbit_delta: Vec2,
    pan_delta: Vec2,
    scroll: f32,
    primary_down: bool,
    secondary_down: bool,
}

impl PointerState {
    /// Creates a new `PointerState` with no motion recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Motion is attributed to whichever
    /// drag gesture is active at the time of the event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        let delta = new_pos - self.position;
        if self.primary_down {
            self.orbit_delta += delta;
        }
        if self.secondary_down {
            self.pan_delta += delta;
        }
        self.position = new_pos;
    }

    /// Process a `MouseInput` event for the two drag buttons.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let down = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.primary_down = down,
            MouseButton::Right => self.secondary_down = down,
            _ => {}
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => self.scroll += y,
            MouseScrollDelta::PixelDelta(pos) => {
                // Normalize pixel delta: ~40 pixels ≈ 1 line
                self.scroll += (pos.y / 40.0) as f32;
            }
        }
    }

    /// Clears per-frame accumulators. Button and position state persist.
    pub fn clear_transients(&mut self) {
        self.orbit_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Drag motion accumulated while the primary button was held.
    #[must_use]
    pub fn orbit_delta(&self) -> Vec2 {
        self.orbit_delta
    }

    /// Drag motion accumulated while the secondary button was held.
    #[must_use]
    pub fn pan_delta(&self) -> Vec2 {
        self.pan_delta
    }

    /// Scroll wheel lines accumulated this frame (positive = scroll up).
    #[must_use]
    pub fn zoom_delta(&self) -> f32 {
        self.scroll
    }

    /// Current cursor position in window coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }
}
