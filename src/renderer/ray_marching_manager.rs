use super::{
    buffer_packer::SceneBuffers,
    config_renderer::{ManagerConfig, BUFFER_LABEL},
    recompile_cache::{RecompilationCache, RecompileOutcome},
    render_device::RenderDevice,
    shader_interfaces::{
        bindings,
        camera_uniform_buffer::CameraUniformBuffer,
        gpu_layout::assert_buffer_layouts,
        light_buffer::RayMarchLightBuffer,
        render_settings_buffer::RenderSettingsBuffer,
        scene_buffer::RayMarchSceneBuffer,
    },
};
use crate::{
    engine::{
        camera::CameraState,
        object::object_collection::ObjectCollection,
        scene_errors::SceneWarning,
        settings::RenderSettings,
        snapshot::{CapacityPolicy, SceneSnapshot},
    },
    helper::anyhow_panic::{log_anyhow_error_and_sources, log_error_and_sources},
    user_interface::{editable_fields::render_settings_editor_ui, EditState},
};
use anyhow::Context;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use std::mem::size_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecompileStatus {
    Unchanged,
    Recompiled,
    /// The previous program is still bound
    Failed,
}

/// What happened during one [`RayMarchingManager::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub recompile_status: RecompileStatus,
    pub object_count: usize,
    pub light_count: usize,
    pub warnings: Vec<SceneWarning>,
}

/// Drives scene-to-shader composition and per-frame buffer uploads for one view.
pub struct RayMarchingManager<D: RenderDevice> {
    capacity_policy: CapacityPolicy,
    settings: RenderSettings,
    cache: RecompilationCache<D::ProgramHandle>,
    snapshot: SceneSnapshot,
    buffers: SceneBuffers,
    last_warnings: Vec<SceneWarning>,

    render_settings_buffer: D::BufferHandle,
    camera_buffer: D::BufferHandle,
    scene_buffer: D::BufferHandle,
    light_buffer: D::BufferHandle,
}

impl<D: RenderDevice> RayMarchingManager<D> {
    /// Panics if the host buffer layouts disagree with the glsl declarations.
    pub fn new(device: &mut D, config: ManagerConfig) -> anyhow::Result<Self> {
        assert_buffer_layouts();

        let render_settings_buffer = device
            .create_constant_buffer(
                BUFFER_LABEL::RENDER_SETTINGS,
                size_of::<RenderSettingsBuffer>(),
            )
            .context("creating render settings buffer")?;
        let camera_buffer = device
            .create_constant_buffer(BUFFER_LABEL::CAMERA, size_of::<CameraUniformBuffer>())
            .context("creating camera buffer")?;
        let scene_buffer = device
            .create_constant_buffer(BUFFER_LABEL::SCENE, size_of::<RayMarchSceneBuffer>())
            .context("creating scene buffer")?;
        let light_buffer = device
            .create_constant_buffer(BUFFER_LABEL::LIGHTS, size_of::<RayMarchLightBuffer>())
            .context("creating light buffer")?;

        Ok(Self {
            capacity_policy: config.capacity_policy,
            settings: RenderSettings::default(),
            cache: RecompilationCache::new(config.generated_source_target),
            snapshot: SceneSnapshot::default(),
            buffers: SceneBuffers::default(),
            last_warnings: Vec::new(),
            render_settings_buffer,
            camera_buffer,
            scene_buffer,
            light_buffer,
        })
    }

    /// Takes this frame's snapshot of `scene` and installs a new fragment program if its
    /// structure changed. Never fails: problems are logged and reported in the returned
    /// [`FrameUpdate`]. `_delta_time` is unused: the manager animates nothing.
    pub fn update(
        &mut self,
        device: &mut D,
        _delta_time: f32,
        scene: &ObjectCollection,
    ) -> FrameUpdate {
        let (snapshot, warnings) = SceneSnapshot::capture(scene, self.capacity_policy);
        self.snapshot = snapshot;

        // only log when the set of warnings changes to avoid flooding every frame
        if warnings != self.last_warnings {
            for warning in &warnings {
                warn!("{}", warning);
            }
            self.last_warnings = warnings.clone();
        }

        let recompile_status = match self.cache.refresh(device, &self.snapshot.shapes()) {
            Ok(RecompileOutcome::Unchanged) => RecompileStatus::Unchanged,
            Ok(RecompileOutcome::Recompiled) => {
                info!(
                    "installed fragment program for {} ray-march objects",
                    self.snapshot.objects.len()
                );
                RecompileStatus::Recompiled
            }
            Err(e) => {
                log_error_and_sources(&e, "install fragment program for new scene structure");
                RecompileStatus::Failed
            }
        };

        FrameUpdate {
            recompile_status,
            object_count: self.snapshot.objects.len(),
            light_count: self.snapshot.lights.len(),
            warnings,
        }
    }

    /// Packs numeric scene state, uploads it and binds every constant buffer. Upload failures
    /// are logged.
    pub fn render(&mut self, device: &mut D, camera: &CameraState) {
        let viewport_size = device.viewport_size();
        self.buffers
            .pack(&self.snapshot, &self.settings, viewport_size, camera);

        let uploads = [
            (
                self.render_settings_buffer,
                self.buffers.render_settings_bytes(),
                BUFFER_LABEL::RENDER_SETTINGS,
            ),
            (self.camera_buffer, self.buffers.camera_bytes(), BUFFER_LABEL::CAMERA),
            (self.scene_buffer, self.buffers.scene_bytes(), BUFFER_LABEL::SCENE),
            (self.light_buffer, self.buffers.light_bytes(), BUFFER_LABEL::LIGHTS),
        ];
        for (buffer, bytes, label) in uploads {
            if let Err(e) = device.upload_buffer(buffer, bytes) {
                log_anyhow_error_and_sources(&e, &format!("upload {}", label));
            }
        }

        device.bind_constant_buffer(bindings::RENDER_SETTINGS, self.render_settings_buffer);
        device.bind_constant_buffer(bindings::CAMERA, self.camera_buffer);
        device.bind_constant_buffer(bindings::SCENE, self.scene_buffer);
        device.bind_constant_buffer(bindings::LIGHTS, self.light_buffer);
    }

    pub fn render_gui_controls(&mut self, ui: &mut egui::Ui) -> EditState {
        ui.label("Render Settings");
        render_settings_editor_ui(ui, &mut self.settings)
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    pub fn snapshot(&self) -> &SceneSnapshot {
        &self.snapshot
    }

    pub fn buffers(&self) -> &SceneBuffers {
        &self.buffers
    }

    pub fn recompile_count(&self) -> usize {
        self.cache.recompile_count()
    }

    /// Fragment program generated for the latest scene structure
    pub fn fragment_program_source(&self) -> Option<&str> {
        self.cache.latest_source()
    }

    pub fn compiled_program(&self) -> Option<&D::ProgramHandle> {
        self.cache.compiled_program()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{
            object::operation::BoolOperator, primitives::sdf_kind::SdfKind,
            scene_errors::SceneEntity,
        },
        renderer::headless_device::HeadlessDevice,
    };

    fn manager_and_device() -> (RayMarchingManager<HeadlessDevice>, HeadlessDevice) {
        let mut device = HeadlessDevice::new([320, 240]).unwrap();
        let manager = RayMarchingManager::new(&mut device, ManagerConfig::default()).unwrap();
        (manager, device)
    }

    #[test]
    fn render_binds_uploaded_buffers_to_slots() {
        let (mut manager, mut device) = manager_and_device();
        let mut scene = ObjectCollection::new();
        scene
            .new_object("sphere", SdfKind::Sphere, BoolOperator::Union)
            .unwrap();
        scene.new_light("light", glam::Vec3::Y).unwrap();

        manager.update(&mut device, 0.016, &scene);
        manager.render(&mut device, &CameraState::default());

        let buffers = manager.buffers();
        assert_eq!(
            device.bound_buffer_contents(bindings::RENDER_SETTINGS),
            Some(buffers.render_settings_bytes())
        );
        assert_eq!(device.bound_buffer_contents(bindings::CAMERA), Some(buffers.camera_bytes()));
        assert_eq!(device.bound_buffer_contents(bindings::SCENE), Some(buffers.scene_bytes()));
        assert_eq!(device.bound_buffer_contents(bindings::LIGHTS), Some(buffers.light_bytes()));

        let settings: RenderSettingsBuffer = bytemuck::pod_read_unaligned(
            device
                .bound_buffer_contents(bindings::RENDER_SETTINGS)
                .unwrap(),
        );
        assert_eq!(settings.resolution, [320.0, 240.0]);
    }

    #[test]
    fn compilation_failure_is_reported_not_propagated() {
        let (mut manager, mut device) = manager_and_device();
        let mut scene = ObjectCollection::new();
        scene
            .new_object("sphere", SdfKind::Sphere, BoolOperator::Union)
            .unwrap();

        assert_eq!(
            manager.update(&mut device, 0.016, &scene).recompile_status,
            RecompileStatus::Recompiled
        );
        let installed_id = device.bound_program().unwrap().id;

        device.set_fail_compilation(true);
        scene
            .new_object("box", SdfKind::Box, BoolOperator::Subtraction)
            .unwrap();
        let frame = manager.update(&mut device, 0.016, &scene);
        assert_eq!(frame.recompile_status, RecompileStatus::Failed);
        assert_eq!(frame.object_count, 2);
        assert_eq!(device.bound_program().unwrap().id, installed_id);

        // rendering continues with the old program
        manager.render(&mut device, &CameraState::default());
        assert!(device.bound_buffer_contents(bindings::SCENE).is_some());
        assert_eq!(
            manager.update(&mut device, 0.016, &scene).recompile_status,
            RecompileStatus::Unchanged
        );
    }

    #[test]
    fn warnings_are_reported_every_frame() {
        let (mut manager, mut device) = manager_and_device();
        let mut scene = ObjectCollection::new();
        for _ in 0..crate::config::RAYMARCH_MAX_LIGHTS + 1 {
            scene.new_light("light", glam::Vec3::Y).unwrap();
        }
        for _ in 0..2 {
            let frame = manager.update(&mut device, 0.016, &scene);
            assert_eq!(frame.light_count, crate::config::RAYMARCH_MAX_LIGHTS);
            assert!(matches!(
                frame.warnings[..],
                [SceneWarning::SceneCapacityExceeded {
                    entity: SceneEntity::Light,
                    ..
                }]
            ));
        }
    }
}
