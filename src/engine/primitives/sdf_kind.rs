use crate::renderer::shader_interfaces::scene_buffer::{primitive_codes, SceneBufferUnit};
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod primitive_names {
    pub const SPHERE: &str = "Sphere";
    pub const BOX: &str = "Box";
    pub const TORUS: &str = "Torus";
    pub const CONE: &str = "Cone";
    pub const CYLINDER: &str = "Cylinder";
    pub const CAPSULE: &str = "Capsule";
}

/// The fixed set of signed distance functions a ray-march object can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SdfKind {
    Sphere,
    Box,
    Torus,
    Cone,
    Cylinder,
    Capsule,
}

impl SdfKind {
    pub const VARIANTS: &'static [SdfKind] = &[
        SdfKind::Sphere,
        SdfKind::Box,
        SdfKind::Torus,
        SdfKind::Cone,
        SdfKind::Cylinder,
        SdfKind::Capsule,
    ];

    /// Code written to the `sdf_kind` field of the scene buffer.
    pub fn code(&self) -> SceneBufferUnit {
        match *self {
            Self::Sphere => primitive_codes::SPHERE,
            Self::Box => primitive_codes::BOX,
            Self::Torus => primitive_codes::TORUS,
            Self::Cone => primitive_codes::CONE,
            Self::Cylinder => primitive_codes::CYLINDER,
            Self::Capsule => primitive_codes::CAPSULE,
        }
    }

    pub fn from_code(code: SceneBufferUnit) -> Result<Self, PrimitiveError> {
        match code {
            primitive_codes::SPHERE => Ok(Self::Sphere),
            primitive_codes::BOX => Ok(Self::Box),
            primitive_codes::TORUS => Ok(Self::Torus),
            primitive_codes::CONE => Ok(Self::Cone),
            primitive_codes::CYLINDER => Ok(Self::Cylinder),
            primitive_codes::CAPSULE => Ok(Self::Capsule),
            _ => Err(PrimitiveError::UnsupportedPrimitiveKind { code }),
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Self::Sphere => primitive_names::SPHERE,
            Self::Box => primitive_names::BOX,
            Self::Torus => primitive_names::TORUS,
            Self::Cone => primitive_names::CONE,
            Self::Cylinder => primitive_names::CYLINDER,
            Self::Capsule => primitive_names::CAPSULE,
        }
    }

    pub fn variant_names() -> Vec<(Self, &'static str)> {
        Self::VARIANTS
            .iter()
            .map(|kind| (*kind, kind.name()))
            .collect::<Vec<(Self, &'static str)>>()
    }

    /// Labels for the parameter slots this kind reads. Unused slots are `None`.
    pub fn parameter_labels(&self) -> [Option<&'static str>; 4] {
        match *self {
            Self::Sphere => [Some("Radius"), None, None, None],
            Self::Box => [Some("Half width"), Some("Half height"), Some("Half depth"), None],
            Self::Torus => [Some("Major radius"), Some("Minor radius"), None, None],
            Self::Cone => [Some("Height"), Some("Base radius"), None, None],
            Self::Cylinder => [Some("Radius"), Some("Half height"), None, None],
            Self::Capsule => [Some("Radius"), Some("Half length"), None, None],
        }
    }

    pub fn default_parameters(&self) -> Vec4 {
        match *self {
            Self::Sphere => Vec4::new(1.0, 0.0, 0.0, 0.0),
            Self::Box => Vec4::new(0.5, 0.5, 0.5, 0.0),
            Self::Torus => Vec4::new(1.0, 0.25, 0.0, 0.0),
            Self::Cone => Vec4::new(1.0, 0.5, 0.0, 0.0),
            Self::Cylinder => Vec4::new(0.5, 1.0, 0.0, 0.0),
            Self::Capsule => Vec4::new(0.25, 0.5, 0.0, 0.0),
        }
    }

    /// Signed distance from local-space point `p` to this primitive.
    ///
    /// _Note: must evaluate the same function as the matching fragment in
    /// [`super::glsl_fragments`]_
    pub fn distance(&self, p: Vec3, parameters: Vec4) -> f32 {
        match *self {
            Self::Sphere => p.length() - parameters.x,
            Self::Box => {
                let q = p.abs() - parameters.truncate();
                q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
            }
            Self::Torus => {
                let q = Vec2::new(Vec2::new(p.x, p.z).length() - parameters.x, p.y);
                q.length() - parameters.y
            }
            Self::Cone => {
                let q = Vec2::new(parameters.y, -parameters.x);
                let w = Vec2::new(Vec2::new(p.x, p.z).length(), p.y);
                let a = w - q * (w.dot(q) / q.dot(q)).clamp(0.0, 1.0);
                let b = w - q * Vec2::new((w.x / q.x).clamp(0.0, 1.0), 1.0);
                let k = glsl_sign(q.y);
                let d = a.dot(a).min(b.dot(b));
                let s = (k * (w.x * q.y - w.y * q.x)).max(k * (w.y - q.y));
                d.sqrt() * glsl_sign(s)
            }
            Self::Cylinder => {
                let d = Vec2::new(Vec2::new(p.x, p.z).length(), p.y).abs()
                    - Vec2::new(parameters.x, parameters.y);
                d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
            }
            Self::Capsule => {
                let q = Vec3::new(p.x, p.y - p.y.clamp(-parameters.y, parameters.y), p.z);
                q.length() - parameters.x
            }
        }
    }
}

impl TryFrom<SceneBufferUnit> for SdfKind {
    type Error = PrimitiveError;

    fn try_from(code: SceneBufferUnit) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl std::fmt::Display for SdfKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `sign` as defined by glsl: 0 maps to 0
fn glsl_sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    #[error("unsupported primitive kind code {code}")]
    UnsupportedPrimitiveKind { code: SceneBufferUnit },
}

// ~~ Tests ~~

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPSILON, "{} != {}", a, b);
    }

    #[test]
    fn codes_round_trip_and_zero_is_reserved() {
        for kind in SdfKind::VARIANTS {
            assert_ne!(kind.code(), primitive_codes::NULL);
            assert_eq!(SdfKind::try_from(kind.code()), Ok(*kind));
        }
        assert_eq!(
            SdfKind::from_code(primitive_codes::NULL),
            Err(PrimitiveError::UnsupportedPrimitiveKind { code: 0 })
        );
        assert_eq!(
            SdfKind::from_code(99),
            Err(PrimitiveError::UnsupportedPrimitiveKind { code: 99 })
        );
    }

    #[test]
    fn sphere_distance() {
        let params = Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_close(SdfKind::Sphere.distance(Vec3::ZERO, params), -1.0);
        assert_close(SdfKind::Sphere.distance(Vec3::new(3.0, 0.0, 0.0), params), 2.0);
    }

    #[test]
    fn box_distance() {
        let params = Vec4::new(1.0, 2.0, 3.0, 0.0);
        assert_close(SdfKind::Box.distance(Vec3::ZERO, params), -1.0);
        assert_close(SdfKind::Box.distance(Vec3::new(0.0, 4.0, 0.0), params), 2.0);
        // outside a corner
        let corner = SdfKind::Box.distance(Vec3::new(2.0, 3.0, 3.0), params);
        assert_close(corner, 2.0_f32.sqrt());
    }

    #[test]
    fn torus_distance() {
        let params = Vec4::new(2.0, 0.5, 0.0, 0.0);
        // center of the tube
        assert_close(SdfKind::Torus.distance(Vec3::new(2.0, 0.0, 0.0), params), -0.5);
        // through the hole
        assert_close(SdfKind::Torus.distance(Vec3::ZERO, params), 1.5);
    }

    #[test]
    fn cone_distance() {
        let params = Vec4::new(2.0, 1.0, 0.0, 0.0);
        // above the apex
        assert_close(SdfKind::Cone.distance(Vec3::new(0.0, 1.0, 0.0), params), 1.0);
        // below the base
        assert_close(SdfKind::Cone.distance(Vec3::new(0.0, -3.0, 0.0), params), 1.0);
        // inside
        assert!(SdfKind::Cone.distance(Vec3::new(0.0, -1.5, 0.0), params) < 0.0);
    }

    #[test]
    fn cylinder_distance() {
        let params = Vec4::new(1.0, 2.0, 0.0, 0.0);
        assert_close(SdfKind::Cylinder.distance(Vec3::ZERO, params), -1.0);
        assert_close(SdfKind::Cylinder.distance(Vec3::new(3.0, 0.0, 0.0), params), 2.0);
        assert_close(SdfKind::Cylinder.distance(Vec3::new(0.0, 5.0, 0.0), params), 3.0);
    }

    #[test]
    fn capsule_distance() {
        let params = Vec4::new(0.5, 1.0, 0.0, 0.0);
        assert_close(SdfKind::Capsule.distance(Vec3::new(0.0, 3.0, 0.0), params), 1.5);
        assert_close(SdfKind::Capsule.distance(Vec3::new(2.0, 0.5, 0.0), params), 1.5);
    }
}
