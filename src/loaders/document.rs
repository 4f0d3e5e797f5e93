use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use super::accessor::{decode_indices, decode_vec3, Accessor, BufferView, DecodeError};

/// Structural failures that stop a load outright
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Parse(#[from] gltf::Error),
    #[error("model contains no meshes")]
    NoMeshes,
    #[error("mesh {index} not found (model has {count} meshes)")]
    MeshNotFound { index: usize, count: usize },
    #[error("mesh {mesh} has no primitive {index} (it has {count})")]
    PrimitiveNotFound {
        mesh: usize,
        index: usize,
        count: usize,
    },
}

/// One draw primitive: attribute name to accessor index, plus optional indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Primitive {
    pub attributes: BTreeMap<String, usize>,
    pub indices: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

/// The parts of a glTF document the viewer reads, with buffers resolved
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub buffers: Vec<Vec<u8>>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub meshes: Vec<Mesh>,
}

impl Document {
    /// Parse a `.glb` or `.gltf` file and load its buffers (images are skipped)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob)?;
        Ok(Self::from_gltf(&document, buffers))
    }

    /// Parse an in-memory GLB, or glTF JSON whose buffers are embedded
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&document, None, blob)?;
        Ok(Self::from_gltf(&document, buffers))
    }

    pub fn from_gltf(document: &gltf::Document, buffers: Vec<gltf::buffer::Data>) -> Self {
        let buffers = buffers.into_iter().map(|data| data.0).collect();

        let buffer_views = document
            .views()
            .map(|view| BufferView {
                buffer: view.buffer().index(),
                byte_offset: view.offset(),
                byte_length: view.length(),
            })
            .collect();

        // glTF keeps byteStride on the view; the decoder expects it on the accessor
        let accessors = document
            .accessors()
            .map(|accessor| {
                let view = accessor.view();
                Accessor {
                    buffer_view: view.as_ref().map(|view| view.index()),
                    byte_offset: accessor.offset(),
                    component_type: accessor.data_type().into(),
                    element_type: accessor.dimensions().into(),
                    count: accessor.count(),
                    byte_stride: view.and_then(|view| view.stride()),
                }
            })
            .collect();

        let meshes = document
            .meshes()
            .map(|mesh| Mesh {
                name: mesh.name().map(str::to_owned),
                primitives: mesh
                    .primitives()
                    .map(|primitive| Primitive {
                        attributes: primitive
                            .attributes()
                            .map(|(semantic, accessor)| (semantic.to_string(), accessor.index()))
                            .collect(),
                        indices: primitive.indices().map(|accessor| accessor.index()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            buffers,
            buffer_views,
            accessors,
            meshes,
        }
    }

    /// Resolve an accessor to its backing blob and view
    pub fn resolve(&self, accessor_index: usize) -> Result<(&[u8], &BufferView, &Accessor), DecodeError> {
        let accessor = self
            .accessors
            .get(accessor_index)
            .ok_or(DecodeError::MissingAccessor(accessor_index))?;
        let view_index = accessor.buffer_view.ok_or(DecodeError::NoBufferView)?;
        let view = self
            .buffer_views
            .get(view_index)
            .ok_or(DecodeError::MissingBufferView(view_index))?;
        let buffer = self
            .buffers
            .get(view.buffer)
            .ok_or(DecodeError::MissingBuffer(view.buffer))?;
        Ok((buffer, view, accessor))
    }

    pub fn decode_vec3(&self, accessor_index: usize) -> Result<Vec<f32>, DecodeError> {
        let (buffer, view, accessor) = self.resolve(accessor_index)?;
        decode_vec3(buffer, view, accessor)
    }

    pub fn decode_indices(&self, accessor_index: usize) -> Result<Vec<u32>, DecodeError> {
        let (buffer, view, accessor) = self.resolve(accessor_index)?;
        decode_indices(buffer, view, accessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::accessor::{ComponentType, ElementType};

    fn document_with_view(view: BufferView) -> Document {
        Document {
            buffers: vec![vec![0u8; 24]],
            buffer_views: vec![view],
            accessors: vec![Accessor {
                buffer_view: Some(0),
                byte_offset: 0,
                component_type: ComponentType::F32,
                element_type: ElementType::Vec3,
                count: 2,
                byte_stride: None,
            }],
            meshes: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_missing_accessor() {
        let doc = document_with_view(BufferView {
            buffer: 0,
            byte_offset: 0,
            byte_length: 24,
        });
        assert_eq!(doc.decode_vec3(3), Err(DecodeError::MissingAccessor(3)));
    }

    #[test]
    fn test_resolve_missing_buffer() {
        let doc = document_with_view(BufferView {
            buffer: 2,
            byte_offset: 0,
            byte_length: 24,
        });
        assert_eq!(doc.decode_vec3(0), Err(DecodeError::MissingBuffer(2)));
    }

    #[test]
    fn test_resolve_accessor_without_view() {
        let mut doc = document_with_view(BufferView {
            buffer: 0,
            byte_offset: 0,
            byte_length: 24,
        });
        doc.accessors[0].buffer_view = None;
        assert_eq!(doc.decode_vec3(0), Err(DecodeError::NoBufferView));

        doc.accessors[0].buffer_view = Some(5);
        assert_eq!(doc.decode_vec3(0), Err(DecodeError::MissingBufferView(5)));
    }

    #[test]
    fn test_decode_through_document() {
        let doc = document_with_view(BufferView {
            buffer: 0,
            byte_offset: 0,
            byte_length: 24,
        });
        assert_eq!(doc.decode_vec3(0).unwrap(), vec![0.0; 6]);
    }

    #[test]
    fn test_from_slice_rejects_garbage() {
        let result = Document::from_slice(b"definitely not a model");
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
