/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// What the viewer core needs from the windowing layer
pub trait WindowContext {
    /// Get window dimensions in physical pixels
    fn dimensions(&self) -> WindowDimensions;

    /// Ask for a new frame to be rendered
    fn request_redraw(&self);

    /// Physical pixels per logical pixel
    fn scale_factor(&self) -> f64 {
        1.0
    }
}
