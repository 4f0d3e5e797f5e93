use glam::Mat4;

/// Normal in effect before any normal has been submitted in a frame
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// How a frame is shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lighting {
    /// One directional light fixed to the camera
    Headlight {
        /// Eye-space direction towards the light
        direction: [f32; 3],
        diffuse: f32,
        ambient: f32,
    },
    /// Lighting off; every surface gets `color`
    Flat { color: [f32; 3] },
}

impl Lighting {
    pub fn is_lit(&self) -> bool {
        matches!(self, Lighting::Headlight { .. })
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting::Flat { color: [1.0; 3] }
    }
}

/// Per-frame state set before any geometry is submitted
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSetup {
    pub clear_color: [f32; 4],
    pub view: Mat4,
    pub projection: Mat4,
    pub model: Mat4,
    pub lighting: Lighting,
}

/// Immediate-mode style submission target.
///
/// A `normal` stays current until the next one and applies to every
/// `vertex` emitted after it. Every three vertices form a triangle.
pub trait FrameTarget {
    fn begin_frame(&mut self, setup: &FrameSetup);

    fn normal(&mut self, normal: [f32; 3]);

    fn vertex(&mut self, position: [f32; 3]);

    fn present(&mut self);
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// An assembled triangle list ready for upload
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub setup: FrameSetup,
    pub vertices: Vec<Vertex>,
}

impl Frame {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertices of complete triangles; a trailing partial triangle is dropped
    pub fn drawable_vertices(&self) -> &[Vertex] {
        &self.vertices[..self.triangle_count() * 3]
    }
}

/// Collects submitted geometry into a [`Frame`], latching the current normal
/// into each vertex
#[derive(Debug, Clone)]
pub struct TriangleAssembler {
    frame: Frame,
    current_normal: [f32; 3],
    presented: bool,
}

impl TriangleAssembler {
    pub fn new() -> Self {
        Self {
            frame: Frame::default(),
            current_normal: DEFAULT_NORMAL,
            presented: false,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Whether the last frame begun has been presented
    pub fn is_presented(&self) -> bool {
        self.presented
    }
}

impl Default for TriangleAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTarget for TriangleAssembler {
    fn begin_frame(&mut self, setup: &FrameSetup) {
        self.frame.setup = *setup;
        self.frame.vertices.clear();
        self.current_normal = DEFAULT_NORMAL;
        self.presented = false;
    }

    fn normal(&mut self, normal: [f32; 3]) {
        self.current_normal = normal;
    }

    fn vertex(&mut self, position: [f32; 3]) {
        self.frame.vertices.push(Vertex {
            position,
            normal: self.current_normal,
        });
    }

    fn present(&mut self) {
        self.presented = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_latches_until_replaced() {
        let mut assembler = TriangleAssembler::new();
        assembler.begin_frame(&FrameSetup::default());

        assembler.vertex([0.0, 0.0, 0.0]);
        assembler.normal([1.0, 0.0, 0.0]);
        assembler.vertex([1.0, 0.0, 0.0]);
        assembler.vertex([2.0, 0.0, 0.0]);
        assembler.normal([0.0, 1.0, 0.0]);
        assembler.vertex([3.0, 0.0, 0.0]);
        assembler.present();

        let normals: Vec<_> = assembler.frame().vertices.iter().map(|v| v.normal).collect();
        assert_eq!(
            normals,
            vec![DEFAULT_NORMAL, [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
        assert!(assembler.is_presented());
    }

    #[test]
    fn test_begin_frame_resets_state() {
        let mut assembler = TriangleAssembler::new();
        assembler.begin_frame(&FrameSetup::default());
        assembler.normal([0.0, -1.0, 0.0]);
        assembler.vertex([1.0, 1.0, 1.0]);
        assembler.present();

        let setup = FrameSetup {
            lighting: Lighting::Flat { color: [0.5; 3] },
            ..FrameSetup::default()
        };
        assembler.begin_frame(&setup);
        assembler.vertex([2.0, 2.0, 2.0]);

        assert!(!assembler.is_presented());
        assert_eq!(assembler.frame().setup, setup);
        assert_eq!(
            assembler.frame().vertices,
            vec![Vertex {
                position: [2.0, 2.0, 2.0],
                normal: DEFAULT_NORMAL
            }]
        );
    }

    #[test]
    fn test_partial_triangle_not_drawable() {
        let vertex = Vertex {
            position: [0.0; 3],
            normal: DEFAULT_NORMAL,
        };
        let frame = Frame {
            setup: FrameSetup::default(),
            vertices: vec![vertex; 7],
        };

        assert_eq!(frame.triangle_count(), 2);
        assert_eq!(frame.drawable_vertices().len(), 6);
    }

    #[test]
    fn test_vertex_layout_is_tight() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
