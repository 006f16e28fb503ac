use super::{material::Material, operation::BoolOperator, transform::Transform};
use crate::{
    engine::primitives::sdf_kind::{PrimitiveError, SdfKind},
    helper::unique_id_gen::{UniqueId, UniqueIdType},
    renderer::shader_interfaces::scene_buffer::SceneBufferUnit,
};
use glam::Vec4;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub UniqueId);

impl UniqueIdType for ObjectId {
    fn raw_id(&self) -> UniqueId {
        self.0
    }
}
impl From<UniqueId> for ObjectId {
    fn from(id: UniqueId) -> Self {
        Self(id)
    }
}
impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One primitive in the ray-marched scene and the operator combining it with the objects
/// before it.
#[derive(Debug, Clone, PartialEq)]
pub struct RayMarchObject {
    id: ObjectId,
    pub name: String,
    /// Excluded from the scene when false
    pub active: bool,
    /// Raw primitive kind code as edited in the ui. See [`SdfKind::from_code`].
    pub sdf_kind: SceneBufferUnit,
    /// Kind dependent shape parameters. See [`SdfKind::parameter_labels`].
    pub parameters: Vec4,
    pub bool_operator: BoolOperator,
    pub transform: Transform,
    pub material: Material,
}

impl RayMarchObject {
    pub fn new(
        id: ObjectId,
        name: String,
        kind: SdfKind,
        bool_operator: BoolOperator,
    ) -> Self {
        Self {
            id,
            name,
            active: true,
            sdf_kind: kind.code(),
            parameters: kind.default_parameters(),
            bool_operator,
            transform: Transform::default(),
            material: Material::default(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> Result<SdfKind, PrimitiveError> {
        SdfKind::from_code(self.sdf_kind)
    }

    /// Changes the kind, resetting parameters to the new kind's defaults
    pub fn set_kind(&mut self, kind: SdfKind) {
        self.sdf_kind = kind.code();
        self.parameters = kind.default_parameters();
    }
}
