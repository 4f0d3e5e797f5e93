use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};
use std::thread::{self, ThreadId};

use log::Level;

use glb_viewer::loaders::{
    extract_mesh, Accessor, BufferView, ComponentType, Document, ElementType, LoadError, Mesh,
    MeshSelection, Primitive, NORMAL, POSITION,
};

const TRIANGLE_POSITIONS: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
const TRIANGLE_NORMALS: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];

fn floats_to_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn vec3_accessor(view: usize, count: usize) -> Accessor {
    Accessor {
        buffer_view: Some(view),
        byte_offset: 0,
        component_type: ComponentType::F32,
        element_type: ElementType::Vec3,
        count,
        byte_stride: None,
    }
}

/// One buffer with three views: positions, normals, u16 indices
fn triangle_document() -> Document {
    let mut buffer = floats_to_bytes(&TRIANGLE_POSITIONS);
    buffer.extend_from_slice(&floats_to_bytes(&TRIANGLE_NORMALS));
    buffer.extend(
        [0u16, 1, 2]
            .iter()
            .flat_map(|v| v.to_le_bytes()),
    );

    let mut attributes = BTreeMap::new();
    attributes.insert(POSITION.to_string(), 0);
    attributes.insert(NORMAL.to_string(), 1);

    Document {
        buffers: vec![buffer],
        buffer_views: vec![
            BufferView {
                buffer: 0,
                byte_offset: 0,
                byte_length: 36,
            },
            BufferView {
                buffer: 0,
                byte_offset: 36,
                byte_length: 36,
            },
            BufferView {
                buffer: 0,
                byte_offset: 72,
                byte_length: 6,
            },
        ],
        accessors: vec![
            vec3_accessor(0, 3),
            vec3_accessor(1, 3),
            Accessor {
                component_type: ComponentType::U16,
                element_type: ElementType::Scalar,
                ..vec3_accessor(2, 3)
            },
        ],
        meshes: vec![Mesh {
            name: Some("triangle".to_string()),
            primitives: vec![Primitive {
                attributes,
                indices: Some(2),
            }],
        }],
    }
}

fn first_primitive(doc: &mut Document) -> &mut Primitive {
    &mut doc.meshes[0].primitives[0]
}

// ============================================================================
// Hand-built documents
// ============================================================================

#[test]
fn test_extracts_all_attributes() {
    let mesh = extract_mesh(&triangle_document(), MeshSelection::default()).unwrap();

    assert_eq!(mesh.positions, TRIANGLE_POSITIONS.to_vec());
    assert_eq!(mesh.normals, TRIANGLE_NORMALS.to_vec());
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn test_missing_normals_is_not_an_error() {
    let mut doc = triangle_document();
    first_primitive(&mut doc).attributes.remove(NORMAL);

    let mesh = extract_mesh(&doc, MeshSelection::default()).unwrap();
    assert!(mesh.normals.is_empty());
    assert_eq!(mesh.positions.len(), 9);
}

#[test]
fn test_missing_indices_leave_empty_index_array() {
    let mut doc = triangle_document();
    first_primitive(&mut doc).indices = None;

    let mesh = extract_mesh(&doc, MeshSelection::default()).unwrap();
    assert!(mesh.indices.is_empty());
    assert_eq!(mesh.positions.len(), 9);
}

#[test]
fn test_unsupported_normal_format_only_drops_normals() {
    let mut doc = triangle_document();
    doc.accessors[1].component_type = ComponentType::I8;

    let mesh = extract_mesh(&doc, MeshSelection::default()).unwrap();
    assert!(mesh.normals.is_empty());
    assert_eq!(mesh.positions, TRIANGLE_POSITIONS.to_vec());
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn test_unsupported_index_format_discards_indices() {
    let mut doc = triangle_document();
    doc.accessors[2].component_type = ComponentType::I8;

    let mesh = extract_mesh(&doc, MeshSelection::default()).unwrap();
    assert!(mesh.indices.is_empty());
    assert_eq!(mesh.normals.len(), 9);
}

#[test]
fn test_dangling_accessor_is_per_attribute() {
    let mut doc = triangle_document();
    first_primitive(&mut doc).attributes.insert(POSITION.to_string(), 42);

    let mesh = extract_mesh(&doc, MeshSelection::default()).unwrap();
    assert!(mesh.positions.is_empty());
    assert_eq!(mesh.normals.len(), 9);
}

#[test]
fn test_no_meshes_is_fatal() {
    let mut doc = triangle_document();
    doc.meshes.clear();

    assert!(matches!(
        extract_mesh(&doc, MeshSelection::default()),
        Err(LoadError::NoMeshes)
    ));
}

#[test]
fn test_mesh_without_primitives_is_fatal() {
    let mut doc = triangle_document();
    doc.meshes[0].primitives.clear();

    assert!(matches!(
        extract_mesh(&doc, MeshSelection::default()),
        Err(LoadError::PrimitiveNotFound {
            mesh: 0,
            index: 0,
            count: 0
        })
    ));
}

#[test]
fn test_out_of_range_selection_is_fatal() {
    let doc = triangle_document();

    assert!(matches!(
        extract_mesh(&doc, MeshSelection { mesh: 3, primitive: 0 }),
        Err(LoadError::MeshNotFound { index: 3, count: 1 })
    ));
    assert!(matches!(
        extract_mesh(&doc, MeshSelection { mesh: 0, primitive: 1 }),
        Err(LoadError::PrimitiveNotFound { index: 1, .. })
    ));
}

// ============================================================================
// Real GLB through the gltf parser
// ============================================================================

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

/// Interleaved position/normal triangle (stride 24) with u16 indices
fn interleaved_triangle_glb() -> Vec<u8> {
    let mut bin = Vec::new();
    for v in 0..3 {
        bin.extend_from_slice(&floats_to_bytes(&TRIANGLE_POSITIONS[v * 3..v * 3 + 3]));
        bin.extend_from_slice(&floats_to_bytes(&TRIANGLE_NORMALS[v * 3..v * 3 + 3]));
    }
    bin.extend([0u16, 1, 2].iter().flat_map(|v| v.to_le_bytes()));

    let json = r#"{
        "asset": { "version": "2.0" },
        "buffers": [ { "byteLength": 78 } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 72, "byteStride": 24, "target": 34962 },
            { "buffer": 0, "byteOffset": 72, "byteLength": 6, "target": 34963 }
        ],
        "accessors": [
            { "bufferView": 0, "byteOffset": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 0, "byteOffset": 12, "componentType": 5126, "count": 3, "type": "VEC3" },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
        ],
        "meshes": [
            { "name": "tri", "primitives": [ { "attributes": { "POSITION": 0, "NORMAL": 1 }, "indices": 2 } ] }
        ]
    }"#;

    glb(json, &bin)
}

#[test]
fn test_glb_document_conversion() {
    let doc = Document::from_slice(&interleaved_triangle_glb()).unwrap();

    assert_eq!(doc.buffers.len(), 1);
    assert_eq!(doc.buffer_views.len(), 2);
    assert_eq!(doc.accessors[0].byte_stride, Some(24));
    assert_eq!(doc.accessors[1].byte_offset, 12);
    assert_eq!(doc.accessors[2].component_type, ComponentType::U16);
    assert_eq!(doc.accessors[2].byte_stride, None);
    assert_eq!(doc.meshes[0].name.as_deref(), Some("tri"));
    assert_eq!(doc.meshes[0].primitives[0].attributes.get(POSITION), Some(&0));
    assert_eq!(doc.meshes[0].primitives[0].attributes.get(NORMAL), Some(&1));
    assert_eq!(doc.meshes[0].primitives[0].indices, Some(2));
}

#[test]
fn test_glb_interleaved_extraction() {
    let doc = Document::from_slice(&interleaved_triangle_glb()).unwrap();
    let mesh = extract_mesh(&doc, MeshSelection::default()).unwrap();

    assert_eq!(mesh.positions, TRIANGLE_POSITIONS.to_vec());
    assert_eq!(mesh.normals, TRIANGLE_NORMALS.to_vec());
    assert_eq!(mesh.indices, vec![0, 1, 2]);
}

#[test]
fn test_open_from_disk() {
    let path = std::env::temp_dir().join(format!("glb-viewer-test-{}.glb", std::process::id()));
    std::fs::write(&path, interleaved_triangle_glb()).unwrap();

    let doc = Document::open(&path);
    std::fs::remove_file(&path).ok();

    let mesh = extract_mesh(&doc.unwrap(), MeshSelection::default()).unwrap();
    assert_eq!(mesh.indices.len(), 3);
}

#[test]
fn test_open_missing_file_is_parse_error() {
    let result = Document::open("/definitely/not/here/model.glb");
    assert!(matches!(result, Err(LoadError::Parse(_))));
}

// ============================================================================
// Load log events
// ============================================================================

struct CapturedRecord {
    thread: ThreadId,
    level: Level,
    message: String,
}

/// Logger that keeps every record so tests can inspect the ones they emitted
struct LogCapture {
    records: Mutex<Vec<CapturedRecord>>,
}

impl log::Log for LogCapture {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(CapturedRecord {
                thread: thread::current().id(),
                level: record.level(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

static LOG_CAPTURE: OnceLock<&'static LogCapture> = OnceLock::new();

fn log_capture() -> &'static LogCapture {
    LOG_CAPTURE.get_or_init(|| {
        let capture: &'static LogCapture = Box::leak(Box::new(LogCapture {
            records: Mutex::new(Vec::new()),
        }));
        log::set_logger(capture).expect("logger already set");
        log::set_max_level(log::LevelFilter::Trace);
        capture
    })
}

/// Run `f` and return the records logged on this thread meanwhile
fn captured_logs<F: FnOnce()>(f: F) -> Vec<(Level, String)> {
    let capture = log_capture();
    let id = thread::current().id();
    let start = capture.records.lock().unwrap().len();

    f();

    capture.records.lock().unwrap()[start..]
        .iter()
        .filter(|r| r.thread == id)
        .map(|r| (r.level, r.message.clone()))
        .collect()
}

fn messages_at(logs: &[(Level, String)], level: Level) -> Vec<&str> {
    logs.iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, m)| m.as_str())
        .collect()
}

#[test]
fn test_load_logs_attribute_counts() {
    let logs = captured_logs(|| {
        extract_mesh(&triangle_document(), MeshSelection::default()).unwrap();
    });

    assert_eq!(
        messages_at(&logs, Level::Info),
        vec!["Loaded vertices: 3", "Loaded normals: 3", "Loaded indices: 3"]
    );
    assert!(messages_at(&logs, Level::Warn).is_empty());
    assert!(messages_at(&logs, Level::Error).is_empty());
}

#[test]
fn test_load_warns_when_normals_missing() {
    let mut doc = triangle_document();
    first_primitive(&mut doc).attributes.remove(NORMAL);

    let logs = captured_logs(|| {
        extract_mesh(&doc, MeshSelection::default()).unwrap();
    });

    assert_eq!(messages_at(&logs, Level::Warn), vec!["Normals missing, lighting disabled"]);
    assert!(!messages_at(&logs, Level::Info).iter().any(|m| m.starts_with("Loaded normals")));
}

#[test]
fn test_load_logs_error_per_failed_attribute() {
    let mut doc = triangle_document();
    doc.accessors[1].component_type = ComponentType::I8;
    doc.accessors[2].element_type = ElementType::Vec2;

    let logs = captured_logs(|| {
        extract_mesh(&doc, MeshSelection::default()).unwrap();
    });

    let errors = messages_at(&logs, Level::Error);
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(errors[0].starts_with("Failed to decode NORMAL (accessor 1)"), "{}", errors[0]);
    assert!(errors[1].starts_with("Failed to decode indices (accessor 2)"), "{}", errors[1]);
    assert_eq!(messages_at(&logs, Level::Info), vec!["Loaded vertices: 3"]);
    assert_eq!(messages_at(&logs, Level::Warn), vec!["Normals missing, lighting disabled"]);
}
