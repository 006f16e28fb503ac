use super::{
    object::{
        light::RayMarchLight, material::Material, object::ObjectId,
        object_collection::ObjectCollection, operation::BoolOperator, transform::Transform,
    },
    primitives::sdf_kind::SdfKind,
    scene_errors::{SceneEntity, SceneWarning},
};
use crate::config::{RAYMARCH_MAX_LIGHTS, RAYMARCH_MAX_OBJECTS};
use glam::Vec4;
use std::fmt;

/// Which entities survive when more are active than the gpu buffers hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
    /// Keep the first entities in list order
    #[default]
    DropNewest,
    /// Keep the last entities in list order
    DropOldest,
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropNewest => write!(f, "dropped newest"),
            Self::DropOldest => write!(f, "dropped oldest"),
        }
    }
}

/// The structural part of an object: everything that ends up in the generated program text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub kind: SdfKind,
    pub bool_operator: BoolOperator,
}

impl ObjectShape {
    pub const fn new(kind: SdfKind, bool_operator: BoolOperator) -> Self {
        Self {
            kind,
            bool_operator,
        }
    }
}

/// An active object with a validated kind
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotObject {
    pub id: ObjectId,
    pub shape: ObjectShape,
    pub parameters: Vec4,
    pub transform: Transform,
    pub material: Material,
}

/// Point-in-time list of what gets rendered this frame. Index `i` is scene buffer slot `i` and
/// fold position `i`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneSnapshot {
    pub objects: Vec<SnapshotObject>,
    pub lights: Vec<RayMarchLight>,
}

impl SceneSnapshot {
    pub fn capture(
        collection: &ObjectCollection,
        policy: CapacityPolicy,
    ) -> (Self, Vec<SceneWarning>) {
        let mut warnings = Vec::new();

        let mut objects = Vec::new();
        for object in collection.objects().iter().filter(|o| o.active) {
            match object.kind() {
                Ok(kind) => objects.push(SnapshotObject {
                    id: object.id(),
                    shape: ObjectShape::new(kind, object.bool_operator),
                    parameters: object.parameters,
                    transform: object.transform,
                    material: object.material,
                }),
                Err(_) => warnings.push(SceneWarning::UnsupportedPrimitiveKind {
                    object_id: object.id(),
                    code: object.sdf_kind,
                }),
            }
        }

        let mut lights: Vec<RayMarchLight> = collection
            .lights()
            .iter()
            .filter(|l| l.active)
            .cloned()
            .collect();

        if let Some(warning) =
            enforce_capacity(&mut objects, RAYMARCH_MAX_OBJECTS, policy, SceneEntity::Object)
        {
            warnings.push(warning);
        }
        if let Some(warning) =
            enforce_capacity(&mut lights, RAYMARCH_MAX_LIGHTS, policy, SceneEntity::Light)
        {
            warnings.push(warning);
        }

        (Self { objects, lights }, warnings)
    }

    pub fn shapes(&self) -> Vec<ObjectShape> {
        self.objects.iter().map(|o| o.shape).collect()
    }
}

fn enforce_capacity<T>(
    entities: &mut Vec<T>,
    capacity: usize,
    policy: CapacityPolicy,
    entity: SceneEntity,
) -> Option<SceneWarning> {
    let requested = entities.len();
    if requested <= capacity {
        return None;
    }
    match policy {
        CapacityPolicy::DropNewest => entities.truncate(capacity),
        CapacityPolicy::DropOldest => {
            entities.drain(0..requested - capacity);
        }
    }
    Some(SceneWarning::SceneCapacityExceeded {
        entity,
        requested,
        capacity,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn inactive_and_unsupported_objects_are_excluded() {
        let mut collection = ObjectCollection::new();
        let a = collection
            .new_object("a", SdfKind::Sphere, BoolOperator::Union)
            .unwrap();
        let hidden = collection
            .new_object("hidden", SdfKind::Box, BoolOperator::Union)
            .unwrap();
        let broken = collection
            .new_object("broken", SdfKind::Box, BoolOperator::Union)
            .unwrap();
        let c = collection
            .new_object("c", SdfKind::Torus, BoolOperator::Subtraction)
            .unwrap();
        collection.get_object_mut(hidden).unwrap().active = false;
        collection.get_object_mut(broken).unwrap().sdf_kind = 42;

        let (snapshot, warnings) = SceneSnapshot::capture(&collection, CapacityPolicy::default());
        let ids: Vec<ObjectId> = snapshot.objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(
            warnings,
            vec![SceneWarning::UnsupportedPrimitiveKind {
                object_id: broken,
                code: 42
            }]
        );
        assert_eq!(
            snapshot.shapes(),
            vec![
                ObjectShape::new(SdfKind::Sphere, BoolOperator::Union),
                ObjectShape::new(SdfKind::Torus, BoolOperator::Subtraction),
            ]
        );
    }

    fn crowded_collection() -> ObjectCollection {
        let mut collection = ObjectCollection::new();
        for i in 0..RAYMARCH_MAX_OBJECTS + 2 {
            collection
                .new_object(format!("{}", i), SdfKind::Sphere, BoolOperator::Union)
                .unwrap();
        }
        collection
    }

    #[test]
    fn drop_newest_keeps_first_objects() {
        let collection = crowded_collection();
        let (snapshot, warnings) = SceneSnapshot::capture(&collection, CapacityPolicy::DropNewest);
        assert_eq!(snapshot.objects.len(), RAYMARCH_MAX_OBJECTS);
        assert_eq!(snapshot.objects[0].id, collection.objects()[0].id());
        assert_eq!(
            warnings,
            vec![SceneWarning::SceneCapacityExceeded {
                entity: SceneEntity::Object,
                requested: RAYMARCH_MAX_OBJECTS + 2,
                capacity: RAYMARCH_MAX_OBJECTS,
                policy: CapacityPolicy::DropNewest,
            }]
        );
    }

    #[test]
    fn drop_oldest_keeps_last_objects() {
        let collection = crowded_collection();
        let (snapshot, _) = SceneSnapshot::capture(&collection, CapacityPolicy::DropOldest);
        assert_eq!(snapshot.objects.len(), RAYMARCH_MAX_OBJECTS);
        assert_eq!(snapshot.objects[0].id, collection.objects()[2].id());
        assert_eq!(
            snapshot.objects.last().unwrap().id,
            collection.objects().last().unwrap().id()
        );
    }

    #[test]
    fn lights_over_capacity() {
        let mut collection = ObjectCollection::new();
        for _ in 0..RAYMARCH_MAX_LIGHTS + 1 {
            collection.new_light("light", Vec3::Y).unwrap();
        }
        let (snapshot, warnings) = SceneSnapshot::capture(&collection, CapacityPolicy::default());
        assert_eq!(snapshot.lights.len(), RAYMARCH_MAX_LIGHTS);
        assert!(matches!(
            warnings[..],
            [SceneWarning::SceneCapacityExceeded {
                entity: SceneEntity::Light,
                ..
            }]
        ));
    }
}
