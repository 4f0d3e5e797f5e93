//! Typed, strided reads out of raw glTF buffer blobs.
//!
//! Every decode path funnels through [`read_component`], which is the only
//! place that turns bytes into numbers. Offsets are checked there, so a
//! malformed accessor fails with [`DecodeError::OutOfBounds`] instead of
//! reading past the blob.

use thiserror::Error;

/// Tight-packed size of one `VEC3` of `f32` (the default vertex stride).
pub const FLOAT_VEC3_SIZE: usize = 3 * std::mem::size_of::<f32>();

/// Accessor component type, with the GL enum codes glTF uses on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentType {
    /// Size of a single component in bytes
    pub const fn size(self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }

    pub const fn gl_code(self) -> u32 {
        match self {
            ComponentType::I8 => 5120,
            ComponentType::U8 => 5121,
            ComponentType::I16 => 5122,
            ComponentType::U16 => 5123,
            ComponentType::U32 => 5125,
            ComponentType::F32 => 5126,
        }
    }

    pub fn from_gl_code(code: u32) -> Option<Self> {
        match code {
            5120 => Some(ComponentType::I8),
            5121 => Some(ComponentType::U8),
            5122 => Some(ComponentType::I16),
            5123 => Some(ComponentType::U16),
            5125 => Some(ComponentType::U32),
            5126 => Some(ComponentType::F32),
            _ => None,
        }
    }
}

impl From<gltf::accessor::DataType> for ComponentType {
    fn from(data_type: gltf::accessor::DataType) -> Self {
        use gltf::accessor::DataType;
        match data_type {
            DataType::I8 => ComponentType::I8,
            DataType::U8 => ComponentType::U8,
            DataType::I16 => ComponentType::I16,
            DataType::U16 => ComponentType::U16,
            DataType::U32 => ComponentType::U32,
            DataType::F32 => ComponentType::F32,
        }
    }
}

/// Accessor element shape (`SCALAR`, `VEC3`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    /// Number of components in one element
    pub const fn component_count(self) -> usize {
        match self {
            ElementType::Scalar => 1,
            ElementType::Vec2 => 2,
            ElementType::Vec3 => 3,
            ElementType::Vec4 | ElementType::Mat2 => 4,
            ElementType::Mat3 => 9,
            ElementType::Mat4 => 16,
        }
    }
}

impl From<gltf::accessor::Dimensions> for ElementType {
    fn from(dimensions: gltf::accessor::Dimensions) -> Self {
        use gltf::accessor::Dimensions;
        match dimensions {
            Dimensions::Scalar => ElementType::Scalar,
            Dimensions::Vec2 => ElementType::Vec2,
            Dimensions::Vec3 => ElementType::Vec3,
            Dimensions::Vec4 => ElementType::Vec4,
            Dimensions::Mat2 => ElementType::Mat2,
            Dimensions::Mat3 => ElementType::Mat3,
            Dimensions::Mat4 => ElementType::Mat4,
        }
    }
}

/// A byte region inside one buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
}

/// Typed description of an array of elements stored in a buffer view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    /// `None` for accessors with no backing view (sparse-only in glTF)
    pub buffer_view: Option<usize>,
    pub byte_offset: usize,
    pub component_type: ComponentType,
    pub element_type: ElementType,
    pub count: usize,
    pub byte_stride: Option<usize>,
}

impl Accessor {
    /// Tight-packed size of one element in bytes
    pub const fn element_size(&self) -> usize {
        self.component_type.size() * self.element_type.component_count()
    }

    /// Distance between consecutive elements.
    ///
    /// Falls back to the tight-packed element size when no explicit stride
    /// is present; interleaved attributes always carry an explicit one.
    pub fn stride(&self) -> usize {
        self.byte_stride.unwrap_or_else(|| self.element_size())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported accessor format {component:?} {element:?}, expected F32 Vec3")]
    UnsupportedAccessorFormat {
        component: ComponentType,
        element: ElementType,
    },
    #[error("unsupported index format {component:?} {element:?}, expected U16 or U32 Scalar")]
    UnsupportedIndexFormat {
        component: ComponentType,
        element: ElementType,
    },
    #[error("read of {size} bytes at offset {offset} is outside a buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("accessor {0} does not exist")]
    MissingAccessor(usize),
    #[error("accessor has no buffer view")]
    NoBufferView,
    #[error("buffer view {0} does not exist")]
    MissingBufferView(usize),
    #[error("buffer {0} does not exist")]
    MissingBuffer(usize),
}

/// A numeric type that can be read little-endian out of a buffer blob
pub trait Component: Copy {
    const SIZE: usize;

    /// Decode from exactly `SIZE` bytes
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_component {
    ($($ty:ty),*) => {
        $(
            impl Component for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_component!(f32, u16, u32);

/// Read one `T` at `offset`, failing if any of its bytes fall outside `blob`
pub fn read_component<T: Component>(blob: &[u8], offset: usize) -> Result<T, DecodeError> {
    let out_of_bounds = DecodeError::OutOfBounds {
        offset,
        size: T::SIZE,
        len: blob.len(),
    };
    let end = offset.checked_add(T::SIZE).ok_or_else(|| out_of_bounds.clone())?;
    blob.get(offset..end)
        .map(T::from_le_slice)
        .ok_or(out_of_bounds)
}

/// Start of the accessor's data: view offset plus accessor offset
pub fn base_offset(view: &BufferView, accessor: &Accessor) -> usize {
    view.byte_offset.saturating_add(accessor.byte_offset)
}

fn element_offset(base: usize, index: usize, stride: usize) -> usize {
    index.saturating_mul(stride).saturating_add(base)
}

/// Decode a `VEC3`/`F32` accessor into a flat `[x, y, z, x, y, z, ...]` array.
///
/// The whole call fails on the first bad read; no partial array is returned.
pub fn decode_vec3(
    buffer: &[u8],
    view: &BufferView,
    accessor: &Accessor,
) -> Result<Vec<f32>, DecodeError> {
    if accessor.component_type != ComponentType::F32 || accessor.element_type != ElementType::Vec3 {
        return Err(DecodeError::UnsupportedAccessorFormat {
            component: accessor.component_type,
            element: accessor.element_type,
        });
    }

    let base = base_offset(view, accessor);
    let stride = accessor.stride();
    let component_size = <f32 as Component>::SIZE;

    let mut out = Vec::with_capacity(accessor.count.saturating_mul(3).min(buffer.len() / component_size));
    for i in 0..accessor.count {
        let start = element_offset(base, i, stride);
        for c in 0..3 {
            out.push(read_component::<f32>(buffer, start.saturating_add(c * component_size))?);
        }
    }

    Ok(out)
}

/// Decode a `SCALAR` index accessor, widening `U16` values to `u32`.
///
/// Indices are tightly packed at their native width. Values are not checked
/// against any vertex count here.
pub fn decode_indices(
    buffer: &[u8],
    view: &BufferView,
    accessor: &Accessor,
) -> Result<Vec<u32>, DecodeError> {
    if accessor.element_type != ElementType::Scalar {
        return Err(DecodeError::UnsupportedIndexFormat {
            component: accessor.component_type,
            element: accessor.element_type,
        });
    }

    let base = base_offset(view, accessor);
    let capacity = accessor.count.min(buffer.len() / 2);

    match accessor.component_type {
        ComponentType::U16 => (0..accessor.count)
            .map(|i| read_component::<u16>(buffer, element_offset(base, i, 2)).map(u32::from))
            .try_fold(Vec::with_capacity(capacity), push_index),
        ComponentType::U32 => (0..accessor.count)
            .map(|i| read_component::<u32>(buffer, element_offset(base, i, 4)))
            .try_fold(Vec::with_capacity(capacity), push_index),
        component => Err(DecodeError::UnsupportedIndexFormat {
            component,
            element: accessor.element_type,
        }),
    }
}

fn push_index(mut out: Vec<u32>, value: Result<u32, DecodeError>) -> Result<Vec<u32>, DecodeError> {
    out.push(value?);
    Ok(out)
}
