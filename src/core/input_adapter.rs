use winit::event::{ElementState, MouseButton, WindowEvent};

use super::controller::{InputHandler, PointerButton};
use super::window::WindowContext;

/// Adapter that bridges Winit events to an [`InputHandler`].
///
/// Winit button events carry no coordinates, so the last cursor position is
/// tracked here and attached to them. A button event that arrives before any
/// cursor position is known is held until the first `CursorMoved`, which
/// supplies its coordinates. Positions are forwarded in logical pixels.
#[derive(Debug, Clone, Default)]
pub struct WinitInputAdapter {
    cursor_position: Option<(f32, f32)>,
    pending_buttons: Vec<(PointerButton, bool)>,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a window event. Returns `false` for events this adapter ignores.
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        handler: &mut dyn InputHandler,
        window: &dyn WindowContext,
    ) -> bool {
        match event {
            WindowEvent::Resized(size) => handler.on_resize(size.width, size.height),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button, handler),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y, handler, window)
            }
            _ => return false,
        }
        true
    }

    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton, handler: &mut dyn InputHandler) {
        let button = Self::map_button(button);
        match self.cursor_position {
            Some((x, y)) => handler.on_pointer_button(button, state.is_pressed(), x, y),
            None => self.pending_buttons.push((button, state.is_pressed())),
        }
    }

    /// Handle a cursor move given in physical pixels
    pub fn cursor_moved(&mut self, x: f64, y: f64, handler: &mut dyn InputHandler, window: &dyn WindowContext) {
        let scale = window.scale_factor();
        let (x, y) = ((x / scale) as f32, (y / scale) as f32);
        self.cursor_position = Some((x, y));

        for (button, pressed) in self.pending_buttons.drain(..) {
            handler.on_pointer_button(button, pressed, x, y);
        }
        handler.on_pointer_motion(x, y, window);
    }

    /// Get current cursor position in logical pixels (if any motion has been seen)
    pub fn cursor_position(&self) -> Option<(f32, f32)> {
        self.cursor_position
    }

    /// Whether button events are waiting for a cursor position
    pub fn has_pending_buttons(&self) -> bool {
        !self.pending_buttons.is_empty()
    }

    pub fn map_button(button: MouseButton) -> PointerButton {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            _ => PointerButton::Other,
        }
    }
}
