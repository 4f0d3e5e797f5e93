use crate::camera::Camera;
use crate::core::controller::{InputHandler, OrbitController, PointerButton};
use crate::core::frame::FrameTarget;
use crate::core::window::WindowContext;
use crate::renderer::{FrameStats, Renderer};
use crate::scene::SceneState;

/// Viewer core: scene, camera, drag controller and renderer, driven by
/// window callbacks
pub struct Viewer {
    scene: SceneState,
    controller: OrbitController,
    camera: Camera,
    renderer: Renderer,
}

impl Viewer {
    pub fn new(scene: SceneState, width: u32, height: u32) -> Self {
        Self {
            scene,
            controller: OrbitController::new(),
            camera: Camera::new(width, height),
            renderer: Renderer::new(),
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Per-frame hook for the windowing layer
    pub fn render_frame<T: FrameTarget + ?Sized>(&self, target: &mut T) -> FrameStats {
        let stats = self.renderer.render_frame(&self.scene, &self.camera, target);
        if stats.skipped > 0 {
            log::trace!("Skipped {} out-of-range vertices", stats.skipped);
        }
        stats
    }
}

impl InputHandler for Viewer {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    fn on_pointer_button(&mut self, button: PointerButton, pressed: bool, x: f32, y: f32) {
        self.controller.on_pointer_button(button, pressed, x, y);
    }

    fn on_pointer_motion(&mut self, x: f32, y: f32, window: &dyn WindowContext) {
        if self.controller.on_pointer_motion(x, y, self.scene.rotation_mut()) {
            window.request_redraw();
        }
    }
}
