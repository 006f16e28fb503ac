use glam::{Mat4, Vec3};

pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.0, -10.0);
pub const DEFAULT_FOV_DEGREES: f32 = 65.0;

/// Output of the host's camera controller as consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    view_matrix: Mat4,
    position: Vec3,
    /// Vertical field of view in radians
    fov: f32,
}

impl CameraState {
    pub fn new(view_matrix: Mat4, position: Vec3, fov: f32) -> Self {
        Self {
            view_matrix,
            position,
            fov,
        }
    }

    /// Left handed camera at `position` looking at `target` with +y up
    pub fn look_at(position: Vec3, target: Vec3, fov: f32) -> Self {
        Self::new(Mat4::look_at_lh(position, target, Vec3::Y), position, fov)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }
    pub fn position(&self) -> Vec3 {
        self.position
    }
    pub fn fov(&self) -> f32 {
        self.fov
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::look_at(
            DEFAULT_CAMERA_POSITION,
            Vec3::new(0.0, 1.0, 0.0),
            DEFAULT_FOV_DEGREES.to_radians(),
        )
    }
}
