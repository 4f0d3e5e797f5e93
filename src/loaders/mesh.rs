use log::{debug, error, info, warn};

use super::document::{Document, LoadError, Primitive};

pub const POSITION: &str = "POSITION";
pub const NORMAL: &str = "NORMAL";

/// Which mesh primitive to extract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshSelection {
    pub mesh: usize,
    pub primitive: usize,
}

/// Flat, render-ready arrays for one primitive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// `[x, y, z, ...]`
    pub positions: Vec<f32>,
    /// Same layout as `positions`; empty when the primitive has no normals
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Extract positions, normals and indices of the selected primitive.
///
/// A missing mesh or primitive is fatal. A bad attribute only leaves that
/// attribute empty, so the rest of the primitive still loads.
pub fn extract_mesh(document: &Document, selection: MeshSelection) -> Result<MeshBuffers, LoadError> {
    debug!(
        "Document: {} meshes, {} accessors, {} buffer views, {} buffers",
        document.meshes.len(),
        document.accessors.len(),
        document.buffer_views.len(),
        document.buffers.len()
    );

    if document.meshes.is_empty() {
        return Err(LoadError::NoMeshes);
    }

    let mesh = document
        .meshes
        .get(selection.mesh)
        .ok_or(LoadError::MeshNotFound {
            index: selection.mesh,
            count: document.meshes.len(),
        })?;
    let primitive = mesh
        .primitives
        .get(selection.primitive)
        .ok_or(LoadError::PrimitiveNotFound {
            mesh: selection.mesh,
            index: selection.primitive,
            count: mesh.primitives.len(),
        })?;

    let mut buffers = MeshBuffers::default();

    if let Some(positions) = decode_attribute(document, primitive, POSITION) {
        info!("Loaded vertices: {}", positions.len() / 3);
        buffers.positions = positions;
    }

    if let Some(normals) = decode_attribute(document, primitive, NORMAL) {
        info!("Loaded normals: {}", normals.len() / 3);
        buffers.normals = normals;
    }

    if let Some(accessor) = primitive.indices {
        match document.decode_indices(accessor) {
            Ok(indices) => {
                info!("Loaded indices: {}", indices.len());
                buffers.indices = indices;
            }
            Err(e) => error!("Failed to decode indices (accessor {}): {}", accessor, e),
        }
    }

    if buffers.normals.is_empty() {
        warn!("Normals missing, lighting disabled");
    }

    Ok(buffers)
}

fn decode_attribute(document: &Document, primitive: &Primitive, name: &str) -> Option<Vec<f32>> {
    let accessor = *primitive.attributes.get(name)?;
    document
        .decode_vec3(accessor)
        .map_err(|e| error!("Failed to decode {} (accessor {}): {}", name, accessor, e))
        .ok()
}
