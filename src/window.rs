use std::sync::Arc;
use winit::window::Window as WinitWindow;

use crate::core::frame::Frame;
use crate::core::surface_renderer::SurfaceRenderer;
use crate::core::window::{WindowContext, WindowDimensions};

/// Wrapper around winit Window with imperative draw API
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    /// Draw an assembled frame with the given surface renderer
    pub fn draw(&self, renderer: &mut SurfaceRenderer, frame: &Frame) -> anyhow::Result<()> {
        renderer.draw(frame)
    }
}

impl WindowContext for Window {
    fn dimensions(&self) -> WindowDimensions {
        let size = self.inner.inner_size();
        WindowDimensions::new(size.width, size.height)
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }
}
