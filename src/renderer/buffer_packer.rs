use super::shader_interfaces::{
    camera_uniform_buffer::CameraUniformBuffer,
    light_buffer::{LightRecord, RayMarchLightBuffer},
    render_settings_buffer::RenderSettingsBuffer,
    scene_buffer::{ObjectRecord, RayMarchSceneBuffer},
};
use crate::engine::{
    camera::CameraState,
    object::light::RayMarchLight,
    settings::RenderSettings,
    snapshot::{SceneSnapshot, SnapshotObject},
};

/// Staging copies of every buffer the fragment program reads. Owned by one manager and
/// rewritten in full each frame.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffers {
    pub render_settings: RenderSettingsBuffer,
    pub camera: CameraUniformBuffer,
    pub scene: RayMarchSceneBuffer,
    pub lights: RayMarchLightBuffer,
}

impl SceneBuffers {
    pub fn pack(
        &mut self,
        snapshot: &SceneSnapshot,
        settings: &RenderSettings,
        viewport_size: [u32; 2],
        camera: &CameraState,
    ) {
        self.render_settings = RenderSettingsBuffer::new(settings, viewport_size);
        self.camera = CameraUniformBuffer::from_camera(camera);
        pack_objects(&mut self.scene, &snapshot.objects);
        pack_lights(&mut self.lights, &snapshot.lights);
    }

    pub fn render_settings_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.render_settings)
    }

    pub fn camera_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.camera)
    }

    pub fn scene_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.scene)
    }

    pub fn light_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.lights)
    }
}

/// Slots past the end of `objects` are zeroed. Expects capacity to have been enforced by the
/// snapshot.
fn pack_objects(scene: &mut RayMarchSceneBuffer, objects: &[SnapshotObject]) {
    debug_assert!(objects.len() <= scene.objects.len());
    for (slot, record) in scene.objects.iter_mut().enumerate() {
        *record = match objects.get(slot) {
            Some(object) => object_record(object),
            None => ObjectRecord::default(),
        };
    }
}

fn object_record(object: &SnapshotObject) -> ObjectRecord {
    ObjectRecord {
        position: object.transform.position.to_array(),
        sdf_kind: object.shape.kind.code(),
        rotation: object.transform.rotation.to_array(),
        bool_operator: object.shape.bool_operator.op_code(),
        scale: object.transform.scale.to_array(),
        metalicness: object.material.metalicness,
        parameters: object.parameters.to_array(),
        colour: object.material.colour.to_array(),
        roughness: object.material.roughness,
    }
}

fn pack_lights(buffer: &mut RayMarchLightBuffer, lights: &[RayMarchLight]) {
    debug_assert!(lights.len() <= buffer.lights.len());
    for (slot, record) in buffer.lights.iter_mut().enumerate() {
        *record = match lights.get(slot) {
            Some(light) => LightRecord {
                position: light.position.to_array(),
                shadow_sharpness: light.shadow_sharpness,
                colour: light.colour.to_array(),
                constant_attenuation: light.constant_attenuation,
                linear_attenuation: light.linear_attenuation,
                quadratic_attenuation: light.quadratic_attenuation,
                padding: [0.; 2],
            },
            None => LightRecord::default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{RAYMARCH_MAX_LIGHTS, RAYMARCH_MAX_OBJECTS},
        engine::{
            object::{object_collection::ObjectCollection, operation::BoolOperator},
            primitives::sdf_kind::SdfKind,
            snapshot::CapacityPolicy,
        },
    };
    use glam::{Vec3, Vec4};

    #[test]
    fn shrinking_scene_zeroes_stale_slots() {
        let mut collection = ObjectCollection::new();
        let a = collection
            .new_object("a", SdfKind::Sphere, BoolOperator::Union)
            .unwrap();
        let b = collection
            .new_object("b", SdfKind::Box, BoolOperator::Intersection)
            .unwrap();
        collection.get_object_mut(b).unwrap().parameters = Vec4::new(1.0, 2.0, 3.0, 0.0);
        let light = collection.new_light("light", Vec3::Y).unwrap();

        let mut buffers = SceneBuffers::default();
        let settings = RenderSettings::default();
        let camera = CameraState::default();
        let (snapshot, _) = SceneSnapshot::capture(&collection, CapacityPolicy::default());
        buffers.pack(&snapshot, &settings, [640, 480], &camera);

        assert_eq!(buffers.scene.objects[1].sdf_kind, SdfKind::Box.code());
        assert_eq!(buffers.scene.objects[1].parameters, [1.0, 2.0, 3.0, 0.0]);
        assert!(!buffers.lights.lights[0].is_empty());

        collection.remove_object(a).unwrap();
        collection.remove_light(light).unwrap();
        let (snapshot, _) = SceneSnapshot::capture(&collection, CapacityPolicy::default());
        buffers.pack(&snapshot, &settings, [640, 480], &camera);

        assert_eq!(buffers.scene.objects[0].bool_operator, BoolOperator::Intersection.op_code());
        for record in &buffers.scene.objects[1..RAYMARCH_MAX_OBJECTS] {
            assert_eq!(*record, ObjectRecord::default());
        }
        for record in &buffers.lights.lights[..RAYMARCH_MAX_LIGHTS] {
            assert!(record.is_empty());
        }
        assert_eq!(buffers.render_settings.resolution, [640.0, 480.0]);
    }
}
