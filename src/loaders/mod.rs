pub mod accessor;
pub mod document;
pub mod mesh;

pub use accessor::{
    decode_indices, decode_vec3, read_component, Accessor, BufferView, ComponentType, DecodeError,
    ElementType,
};
pub use document::{Document, LoadError, Mesh, Primitive};
pub use mesh::{extract_mesh, MeshBuffers, MeshSelection, NORMAL, POSITION};
