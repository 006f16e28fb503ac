use crate::helper::unique_id_gen::{UniqueId, UniqueIdType};
use glam::Vec3;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightId(pub UniqueId);

impl UniqueIdType for LightId {
    fn raw_id(&self) -> UniqueId {
        self.0
    }
}
impl From<UniqueId> for LightId {
    fn from(id: UniqueId) -> Self {
        Self(id)
    }
}
impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point light with distance attenuation `1 / (constant + linear * d + quadratic * d^2)`
#[derive(Debug, Clone, PartialEq)]
pub struct RayMarchLight {
    id: LightId,
    pub name: String,
    pub active: bool,
    pub position: Vec3,
    /// Linear rgb
    pub colour: Vec3,
    /// Higher values give harder shadow edges
    pub shadow_sharpness: f32,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
}

impl RayMarchLight {
    pub fn new(id: LightId, name: String, position: Vec3) -> Self {
        Self {
            id,
            name,
            active: true,
            position,
            colour: Vec3::ONE,
            shadow_sharpness: 16.0,
            constant_attenuation: 1.0,
            linear_attenuation: 0.09,
            quadratic_attenuation: 0.032,
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }
}
