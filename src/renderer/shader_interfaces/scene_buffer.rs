use super::gpu_layout::{GlslType, GpuField, GpuRecord};
use crate::config::RAYMARCH_MAX_OBJECTS;
use bytemuck::{Pod, Zeroable};
use memoffset::offset_of;

pub type SceneBufferUnit = u32;

#[rustfmt::skip]
pub mod op_codes {
    use super::SceneBufferUnit;
    pub const NOP:          SceneBufferUnit = 0x00000000;
    pub const UNION:        SceneBufferUnit = 0x00000001; // OR
    pub const INTERSECTION: SceneBufferUnit = 0x00000002; // AND
    pub const SUBTRACTION:  SceneBufferUnit = 0x00000003;
}

/// _Must match the `primitive_distance` dispatch rendered into the fragment program_
#[rustfmt::skip]
pub mod primitive_codes {
    use super::SceneBufferUnit;
    /// Marks an unused scene buffer slot
    pub const NULL:     SceneBufferUnit = 0x00000000;
    pub const SPHERE:   SceneBufferUnit = 0x00000001;
    pub const BOX:      SceneBufferUnit = 0x00000002;
    pub const TORUS:    SceneBufferUnit = 0x00000003;
    pub const CONE:     SceneBufferUnit = 0x00000004;
    pub const CYLINDER: SceneBufferUnit = 0x00000005;
    pub const CAPSULE:  SceneBufferUnit = 0x00000006;
}

/// Per-object data for one scene buffer slot. An all-zero record is an unused slot.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectRecord {
    pub position: [f32; 3],
    pub sdf_kind: SceneBufferUnit,
    /// Euler angles in radians, applied x then y then z
    pub rotation: [f32; 3],
    pub bool_operator: SceneBufferUnit,
    pub scale: [f32; 3],
    pub metalicness: f32,
    pub parameters: [f32; 4],
    pub colour: [f32; 3],
    pub roughness: f32,
}

impl ObjectRecord {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sdf_kind == primitive_codes::NULL
    }
}

impl GpuRecord for ObjectRecord {
    const GLSL_NAME: &'static str = "ObjectRecord";
    const FIELDS: &'static [GpuField] = &[
        GpuField::new("position", GlslType::Vec3),
        GpuField::new("sdf_kind", GlslType::Uint),
        GpuField::new("rotation", GlslType::Vec3),
        GpuField::new("bool_operator", GlslType::Uint),
        GpuField::new("scale", GlslType::Vec3),
        GpuField::new("metalicness", GlslType::Float),
        GpuField::new("parameters", GlslType::Vec4),
        GpuField::new("colour", GlslType::Vec3),
        GpuField::new("roughness", GlslType::Float),
    ];

    fn host_offsets() -> Vec<usize> {
        vec![
            offset_of!(Self, position),
            offset_of!(Self, sdf_kind),
            offset_of!(Self, rotation),
            offset_of!(Self, bool_operator),
            offset_of!(Self, scale),
            offset_of!(Self, metalicness),
            offset_of!(Self, parameters),
            offset_of!(Self, colour),
            offset_of!(Self, roughness),
        ]
    }
}

/// Fixed capacity array of object records. Slot `i` is fold position `i` in `scene_distance`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RayMarchSceneBuffer {
    pub objects: [ObjectRecord; RAYMARCH_MAX_OBJECTS],
}

impl RayMarchSceneBuffer {
    pub const GLSL_BLOCK_NAME: &'static str = "RayMarchSceneBuffer";
    pub const GLSL_INSTANCE_NAME: &'static str = "scene";
    pub const GLSL_ARRAY_NAME: &'static str = "objects";
}

impl Default for RayMarchSceneBuffer {
    fn default() -> Self {
        Self::zeroed()
    }
}
