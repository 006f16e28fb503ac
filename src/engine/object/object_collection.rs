use super::{
    light::{LightId, RayMarchLight},
    object::{ObjectId, RayMarchObject},
    operation::BoolOperator,
};
use crate::{
    engine::primitives::sdf_kind::SdfKind,
    helper::{
        more_errors::CollectionError,
        unique_id_gen::{UniqueIdError, UniqueIdGen, UniqueIdType},
    },
};
use glam::Vec3;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Editor owned ray-march objects and lights. List order is composition order: object `i` is
/// fold position `i` and scene buffer slot `i` once inactive objects are filtered out.
#[derive(Debug, Clone, Default)]
pub struct ObjectCollection {
    object_id_gen: UniqueIdGen<ObjectId>,
    light_id_gen: UniqueIdGen<LightId>,
    objects: Vec<RayMarchObject>,
    lights: Vec<RayMarchLight>,
}

impl ObjectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    // ~~ Objects ~~

    /// Appends a new object with default parameters, transform and material for `kind`
    pub fn new_object(
        &mut self,
        name: impl Into<String>,
        kind: SdfKind,
        bool_operator: BoolOperator,
    ) -> Result<ObjectId, UniqueIdError> {
        let object_id = self.object_id_gen.new_id()?;
        self.objects.push(RayMarchObject::new(
            object_id,
            name.into(),
            kind,
            bool_operator,
        ));
        Ok(object_id)
    }

    pub fn new_object_default(&mut self) -> Result<ObjectId, UniqueIdError> {
        let object_id = self.object_id_gen.new_id()?;
        let name = format!("New Object {}", object_id.raw_id());
        self.objects.push(RayMarchObject::new(
            object_id,
            name,
            SdfKind::Sphere,
            BoolOperator::Union,
        ));
        Ok(object_id)
    }

    pub fn objects(&self) -> &[RayMarchObject] {
        &self.objects
    }

    pub fn get_object(&self, object_id: ObjectId) -> Option<&RayMarchObject> {
        self.objects.iter().find(|o| o.id() == object_id)
    }

    pub fn get_object_mut(
        &mut self,
        object_id: ObjectId,
    ) -> Result<&mut RayMarchObject, CollectionError> {
        self.objects
            .iter_mut()
            .find(|o| o.id() == object_id)
            .ok_or(CollectionError::InvalidId {
                raw_id: object_id.raw_id(),
            })
    }

    pub fn remove_object(&mut self, object_id: ObjectId) -> Result<RayMarchObject, CollectionError> {
        let index = self.object_index(object_id)?;
        let removed_object = self.objects.remove(index);

        // tell object id generator it can reuse the old object id now
        if let Err(e) = self.object_id_gen.recycle_id(object_id) {
            info!("{}", e);
        }
        Ok(removed_object)
    }

    /// Moves an object to `new_index` in composition order, shifting the objects in between
    pub fn move_object(&mut self, object_id: ObjectId, new_index: usize) -> Result<(), CollectionError> {
        let size = self.objects.len();
        if new_index >= size {
            return Err(CollectionError::OutOfBounds {
                index: new_index,
                size,
            });
        }
        let index = self.object_index(object_id)?;
        let object = self.objects.remove(index);
        self.objects.insert(new_index, object);
        Ok(())
    }

    fn object_index(&self, object_id: ObjectId) -> Result<usize, CollectionError> {
        self.objects
            .iter()
            .position(|o| o.id() == object_id)
            .ok_or(CollectionError::InvalidId {
                raw_id: object_id.raw_id(),
            })
    }

    // ~~ Lights ~~

    pub fn new_light(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
    ) -> Result<LightId, UniqueIdError> {
        let light_id = self.light_id_gen.new_id()?;
        self.lights
            .push(RayMarchLight::new(light_id, name.into(), position));
        Ok(light_id)
    }

    pub fn lights(&self) -> &[RayMarchLight] {
        &self.lights
    }

    pub fn get_light(&self, light_id: LightId) -> Option<&RayMarchLight> {
        self.lights.iter().find(|l| l.id() == light_id)
    }

    pub fn get_light_mut(&mut self, light_id: LightId) -> Result<&mut RayMarchLight, CollectionError> {
        self.lights
            .iter_mut()
            .find(|l| l.id() == light_id)
            .ok_or(CollectionError::InvalidId {
                raw_id: light_id.raw_id(),
            })
    }

    pub fn remove_light(&mut self, light_id: LightId) -> Result<RayMarchLight, CollectionError> {
        let index = self
            .lights
            .iter()
            .position(|l| l.id() == light_id)
            .ok_or(CollectionError::InvalidId {
                raw_id: light_id.raw_id(),
            })?;
        let removed_light = self.lights.remove(index);

        if let Err(e) = self.light_id_gen.recycle_id(light_id) {
            info!("{}", e);
        }
        Ok(removed_light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_keep_insertion_order() {
        let mut collection = ObjectCollection::new();
        let a = collection
            .new_object("a", SdfKind::Sphere, BoolOperator::Union)
            .unwrap();
        let b = collection
            .new_object("b", SdfKind::Box, BoolOperator::Subtraction)
            .unwrap();
        let c = collection.new_object_default().unwrap();

        let ids: Vec<ObjectId> = collection.objects().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(collection.get_object(c).unwrap().name, "New Object 3");

        collection.move_object(c, 0).unwrap();
        let ids: Vec<ObjectId> = collection.objects().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![c, a, b]);
        assert_eq!(
            collection.move_object(a, 3),
            Err(CollectionError::OutOfBounds { index: 3, size: 3 })
        );
    }

    #[test]
    fn removed_ids_are_recycled() {
        let mut collection = ObjectCollection::new();
        let a = collection.new_object_default().unwrap();
        let _b = collection.new_object_default().unwrap();

        let removed = collection.remove_object(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(collection.get_object(a).is_none());
        assert_eq!(
            collection.remove_object(a).unwrap_err(),
            CollectionError::InvalidId { raw_id: a.raw_id() }
        );

        let recycled = collection.new_object_default().unwrap();
        assert_eq!(recycled, a);
        // recycled objects go to the back of the list
        assert_eq!(collection.objects().last().unwrap().id(), a);
    }

    #[test]
    fn edit_light() {
        let mut collection = ObjectCollection::new();
        let light = collection.new_light("sun", Vec3::new(0.0, 10.0, 0.0)).unwrap();
        collection.get_light_mut(light).unwrap().colour = Vec3::new(1.0, 0.5, 0.0);
        assert_eq!(
            collection.get_light(light).unwrap().colour,
            Vec3::new(1.0, 0.5, 0.0)
        );
        collection.remove_light(light).unwrap();
        assert!(collection.lights().is_empty());
    }
}
