use crate::loaders::MeshBuffers;

/// Accumulated model rotation in degrees. Unbounded; wrapping is visual only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// About the X axis
    pub pitch: f32,
    /// About the Y axis
    pub yaw: f32,
}

impl Rotation {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }
}

/// The loaded mesh plus the current rotation.
///
/// Mesh data is fixed once constructed; only the rotation changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    mesh: MeshBuffers,
    rotation: Rotation,
}

impl SceneState {
    pub fn new(mesh: MeshBuffers) -> Self {
        Self {
            mesh,
            rotation: Rotation::default(),
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.mesh.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.mesh.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    pub fn has_normals(&self) -> bool {
        !self.mesh.normals.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.positions.len() / 3
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut Rotation {
        &mut self.rotation
    }
}
