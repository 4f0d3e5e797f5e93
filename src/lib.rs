pub mod camera;
pub mod cli;
pub mod core;
pub mod loaders;
pub mod renderer;
pub mod scene;
pub mod viewer;
pub mod window;

pub use loaders::{extract_mesh, Document, LoadError, MeshBuffers, MeshSelection};
pub use scene::{Rotation, SceneState};
pub use viewer::Viewer;
