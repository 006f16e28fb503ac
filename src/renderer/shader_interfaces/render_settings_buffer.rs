use super::gpu_layout::{GlslType, GpuField, GpuRecord};
use crate::engine::settings::RenderSettings;
use bytemuck::{Pod, Zeroable};
use memoffset::offset_of;

/// Render settings and viewport resolution read by the fragment program
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderSettingsBuffer {
    pub max_steps: u32,
    pub max_distance: f32,
    pub intersection_threshold: f32,
    pub ambient_occlusion_strength: f32,
    /// Viewport width and height in pixels
    pub resolution: [f32; 2],
    pub padding: [f32; 2],
}

impl RenderSettingsBuffer {
    pub const GLSL_INSTANCE_NAME: &'static str = "render_settings";

    pub fn new(settings: &RenderSettings, viewport_size: [u32; 2]) -> Self {
        Self {
            max_steps: settings.max_steps(),
            max_distance: settings.max_distance(),
            intersection_threshold: settings.intersection_threshold(),
            ambient_occlusion_strength: settings.ambient_occlusion_strength(),
            resolution: [viewport_size[0] as f32, viewport_size[1] as f32],
            padding: [0.; 2],
        }
    }
}

impl GpuRecord for RenderSettingsBuffer {
    const GLSL_NAME: &'static str = "RenderSettingsBuffer";
    const FIELDS: &'static [GpuField] = &[
        GpuField::new("max_steps", GlslType::Uint),
        GpuField::new("max_distance", GlslType::Float),
        GpuField::new("intersection_threshold", GlslType::Float),
        GpuField::new("ambient_occlusion_strength", GlslType::Float),
        GpuField::new("resolution", GlslType::Vec2),
        GpuField::new("padding", GlslType::Vec2),
    ];

    fn host_offsets() -> Vec<usize> {
        vec![
            offset_of!(Self, max_steps),
            offset_of!(Self, max_distance),
            offset_of!(Self, intersection_threshold),
            offset_of!(Self, ambient_occlusion_strength),
            offset_of!(Self, resolution),
            offset_of!(Self, padding),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_settings_and_viewport() {
        let mut settings = RenderSettings::default();
        settings.set_max_steps(64);
        let buffer = RenderSettingsBuffer::new(&settings, [1280, 720]);
        assert_eq!(buffer.max_steps, 64);
        assert_eq!(buffer.max_distance, settings.max_distance());
        assert_eq!(buffer.resolution, [1280.0, 720.0]);
        assert_eq!(std::mem::size_of::<RenderSettingsBuffer>(), 32);
    }
}
