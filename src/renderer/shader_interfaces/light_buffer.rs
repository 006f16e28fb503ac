use super::gpu_layout::{GlslType, GpuField, GpuRecord};
use crate::config::RAYMARCH_MAX_LIGHTS;
use bytemuck::{Pod, Zeroable};
use memoffset::offset_of;

/// Per-light data for one light buffer slot. Unused slots are all zero, which the fragment
/// program recognises by the attenuation terms summing to 0.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub position: [f32; 3],
    pub shadow_sharpness: f32,
    pub colour: [f32; 3],
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub padding: [f32; 2],
}

impl LightRecord {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constant_attenuation + self.linear_attenuation + self.quadratic_attenuation <= 0.
    }
}

impl GpuRecord for LightRecord {
    const GLSL_NAME: &'static str = "LightRecord";
    const FIELDS: &'static [GpuField] = &[
        GpuField::new("position", GlslType::Vec3),
        GpuField::new("shadow_sharpness", GlslType::Float),
        GpuField::new("colour", GlslType::Vec3),
        GpuField::new("constant_attenuation", GlslType::Float),
        GpuField::new("linear_attenuation", GlslType::Float),
        GpuField::new("quadratic_attenuation", GlslType::Float),
        GpuField::new("padding", GlslType::Vec2),
    ];

    fn host_offsets() -> Vec<usize> {
        vec![
            offset_of!(Self, position),
            offset_of!(Self, shadow_sharpness),
            offset_of!(Self, colour),
            offset_of!(Self, constant_attenuation),
            offset_of!(Self, linear_attenuation),
            offset_of!(Self, quadratic_attenuation),
            offset_of!(Self, padding),
        ]
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RayMarchLightBuffer {
    pub lights: [LightRecord; RAYMARCH_MAX_LIGHTS],
}

impl RayMarchLightBuffer {
    pub const GLSL_BLOCK_NAME: &'static str = "RayMarchLightBuffer";
    pub const GLSL_INSTANCE_NAME: &'static str = "light_buffer";
    pub const GLSL_ARRAY_NAME: &'static str = "lights";
}

impl Default for RayMarchLightBuffer {
    fn default() -> Self {
        Self::zeroed()
    }
}
