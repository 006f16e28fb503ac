use super::gpu_layout::{GlslType, GpuField, GpuRecord};
use crate::engine::camera::CameraState;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use memoffset::offset_of;

/// Camera data read by the fragment program
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniformBuffer {
    /// Inverse of the view matrix. Converts view space directions to world space
    pub view_inverse: [f32; 16],
    /// Camera position in world space
    pub position: [f32; 3],
    /// Vertical field of view in radians
    pub fov: f32,
}

impl CameraUniformBuffer {
    pub const GLSL_INSTANCE_NAME: &'static str = "camera";

    #[inline]
    pub fn new(view_inverse: Mat4, position: Vec3, fov: f32) -> Self {
        Self {
            view_inverse: view_inverse.to_cols_array(),
            position: position.to_array(),
            fov,
        }
    }

    pub fn from_camera(camera: &CameraState) -> Self {
        Self::new(camera.view_matrix().inverse(), camera.position(), camera.fov())
    }
}

impl Default for CameraUniformBuffer {
    fn default() -> Self {
        Self::from_camera(&CameraState::default())
    }
}

impl GpuRecord for CameraUniformBuffer {
    const GLSL_NAME: &'static str = "CameraBuffer";
    const FIELDS: &'static [GpuField] = &[
        GpuField::new("view_inverse", GlslType::Mat4),
        GpuField::new("position", GlslType::Vec3),
        GpuField::new("fov", GlslType::Float),
    ];

    fn host_offsets() -> Vec<usize> {
        vec![
            offset_of!(Self, view_inverse),
            offset_of!(Self, position),
            offset_of!(Self, fov),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_inverse_maps_origin_to_camera_position() {
        let camera = CameraState::default();
        let buffer = CameraUniformBuffer::from_camera(&camera);
        let view_inverse = Mat4::from_cols_array(&buffer.view_inverse);
        let world = view_inverse.transform_point3(Vec3::ZERO);
        assert!(world.abs_diff_eq(camera.position(), 1e-5));
        assert_eq!(buffer.fov, camera.fov());
    }
}
