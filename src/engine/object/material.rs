use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Linear rgb
    pub colour: Vec3,
    /// 0 to 1
    pub metalicness: f32,
    /// 0 to 1
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            colour: Vec3::splat(0.8),
            metalicness: 0.0,
            roughness: 0.5,
        }
    }
}
