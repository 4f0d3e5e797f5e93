use super::window::WindowContext;
use crate::scene::Rotation;

/// Degrees of rotation per pixel of pointer travel
pub const ROTATION_SENSITIVITY: f32 = 0.5;

/// Pointer button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Callbacks the windowing layer delivers to the viewer core
pub trait InputHandler {
    fn on_resize(&mut self, width: u32, height: u32);

    fn on_pointer_button(&mut self, button: PointerButton, pressed: bool, x: f32, y: f32);

    /// Pointer moved; implementations call `window.request_redraw()` when the
    /// view changed
    fn on_pointer_motion(&mut self, x: f32, y: f32, window: &dyn WindowContext);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Primary button held; `anchor` is the last pointer position seen
    Dragging { anchor: (f32, f32) },
}

/// Turns primary-button drags into incremental pitch/yaw changes
#[derive(Debug, Clone)]
pub struct OrbitController {
    state: DragState,
    sensitivity: f32,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::with_sensitivity(ROTATION_SENSITIVITY)
    }

    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            state: DragState::Idle,
            sensitivity,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn on_pointer_button(&mut self, button: PointerButton, pressed: bool, x: f32, y: f32) {
        if button != PointerButton::Primary {
            return;
        }

        self.state = if pressed {
            DragState::Dragging { anchor: (x, y) }
        } else {
            DragState::Idle
        };
    }

    /// Apply the delta from the anchor to `rotation` and move the anchor.
    /// Returns whether a redraw is needed.
    pub fn on_pointer_motion(&mut self, x: f32, y: f32, rotation: &mut Rotation) -> bool {
        let DragState::Dragging { anchor } = self.state else {
            return false;
        };

        rotation.yaw += (x - anchor.0) * self.sensitivity;
        rotation.pitch += (y - anchor.1) * self.sensitivity;
        self.state = DragState::Dragging { anchor: (x, y) };
        true
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}
