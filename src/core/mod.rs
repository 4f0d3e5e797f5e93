pub mod controller;
pub mod frame;
pub mod gpu_context;
pub mod input_adapter;
pub mod surface_renderer;
pub mod window;

pub use controller::{DragState, InputHandler, OrbitController, PointerButton, ROTATION_SENSITIVITY};
pub use frame::{Frame, FrameSetup, FrameTarget, Lighting, TriangleAssembler, Vertex, DEFAULT_NORMAL};
pub use gpu_context::GpuContext;
pub use input_adapter::WinitInputAdapter;
pub use surface_renderer::SurfaceRenderer;
pub use window::{WindowContext, WindowDimensions};
