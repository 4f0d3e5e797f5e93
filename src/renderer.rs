use crate::camera::Camera;
use crate::core::frame::{FrameSetup, FrameTarget, Lighting};
use crate::scene::SceneState;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Eye-space direction of the camera headlight
pub const HEADLIGHT_DIRECTION: [f32; 3] = [0.0, 0.0, 1.0];
pub const MATERIAL_DIFFUSE: f32 = 0.8;
/// Global ambient 0.2 times material ambient 0.2
pub const AMBIENT: f32 = 0.04;
/// Surface shade used when the mesh has no normals
pub const FLAT_COLOR: [f32; 3] = [0.7, 0.7, 0.7];

/// Counts from one submitted frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub emitted: usize,
    /// Indices that pointed past the end of the position array
    pub skipped: usize,
}

/// Submits the scene as one indexed triangle list
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Headlight when normals exist, flat shading otherwise
    pub fn lighting_for(scene: &SceneState) -> Lighting {
        if scene.has_normals() {
            Lighting::Headlight {
                direction: HEADLIGHT_DIRECTION,
                diffuse: MATERIAL_DIFFUSE,
                ambient: AMBIENT,
            }
        } else {
            Lighting::Flat { color: FLAT_COLOR }
        }
    }

    pub fn frame_setup(&self, scene: &SceneState, camera: &Camera) -> FrameSetup {
        FrameSetup {
            clear_color: CLEAR_COLOR,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            model: Camera::model_matrix(scene.rotation()),
            lighting: Self::lighting_for(scene),
        }
    }

    /// Render one frame into `target`.
    ///
    /// Indices outside the position array are skipped without stopping the
    /// draw. A vertex's normal, when present, is submitted before it.
    pub fn render_frame<T: FrameTarget + ?Sized>(
        &self,
        scene: &SceneState,
        camera: &Camera,
        target: &mut T,
    ) -> FrameStats {
        target.begin_frame(&self.frame_setup(scene, camera));

        let mut stats = FrameStats::default();
        let positions = scene.positions();
        let normals = scene.normals();

        for &index in scene.indices() {
            let Some(position) = vec3_at(positions, index) else {
                stats.skipped += 1;
                continue;
            };

            if let Some(normal) = vec3_at(normals, index) {
                target.normal(normal);
            }
            target.vertex(position);
            stats.emitted += 1;
        }

        target.present();
        stats
    }
}

/// Element `index` of a flat xyz array, if `index * 3 + 2` is in range
fn vec3_at(data: &[f32], index: u32) -> Option<[f32; 3]> {
    let start = (index as usize).checked_mul(3)?;
    match data.get(start..start.checked_add(3)?)? {
        &[x, y, z] => Some([x, y, z]),
        _ => None,
    }
}
