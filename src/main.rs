use anyhow::Context;
use glam::{Vec3, Vec4};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use sdf_composer::{
    config::{ENGINE_NAME, ENGINE_VERSION, ENV, LOCAL_STORAGE_DIR},
    engine::{
        camera::CameraState,
        object::{object_collection::ObjectCollection, operation::BoolOperator},
        primitives::sdf_kind::SdfKind,
        save_states::{load_render_settings, save_render_settings},
        scene_channel::scene_channel,
        settings::RenderSettings,
    },
    helper::{
        anyhow_panic::{anyhow_unwrap, log_error_and_sources},
        logger::init_console_logger,
        more_errors::SaveStateError,
    },
    renderer::{
        config_renderer::ManagerConfig, headless_device::HeadlessDevice,
        ray_marching_manager::RayMarchingManager, recompile_cache::GeneratedSourceTarget,
    },
};
use std::{path::PathBuf, thread, time::Duration};

const VIEWPORT_SIZE: [u32; 2] = [1280, 720];
const DEMO_EDIT_COUNT: usize = 120;
const FRAME_TIME: Duration = Duration::from_millis(2);

fn main() {
    match init_console_logger() {
        Ok(level) => debug!("logger initialized at level {}", level),
        Err(e) => eprintln!("failed to initialize logger: {}", e),
    }
    info!("starting {} {}", ENGINE_NAME, ENGINE_VERSION);

    anyhow_unwrap(run(), "run the ray march demo");
}

fn run() -> anyhow::Result<()> {
    let save_dir = save_dir();
    let settings = match load_render_settings(&save_dir) {
        Ok(settings) => settings,
        Err(SaveStateError::FileNotFound(_)) => RenderSettings::default(),
        Err(e) => {
            log_error_and_sources(&e, "load render settings");
            RenderSettings::default()
        }
    };

    let config = ManagerConfig::from_env();
    let shader_dir = match &config.generated_source_target {
        GeneratedSourceTarget::Directory(dir) => Some(dir.clone()),
        GeneratedSourceTarget::InMemory => None,
    };

    let mut device = HeadlessDevice::new(VIEWPORT_SIZE).context("creating headless device")?;
    let mut manager =
        RayMarchingManager::new(&mut device, config).context("creating ray marching manager")?;
    manager.set_settings(settings);

    let (scene_updater, mut scene_receiver) = scene_channel();
    let editor_thread = thread::spawn(move || {
        let mut collection = demo_scene();
        let pulsing_sphere = collection.objects()[0].id();
        for edit in 0..DEMO_EDIT_COUNT {
            if let Ok(sphere) = collection.get_object_mut(pulsing_sphere) {
                let radius = 1.0 + 0.25 * (edit as f32 * 0.1).sin();
                sphere.parameters = Vec4::new(radius, 0.0, 0.0, 0.0);
            }
            if !scene_updater.publish(collection.clone()) {
                break;
            }
            thread::sleep(FRAME_TIME);
        }
    });

    let camera = CameraState::default();
    let mut frame_count: usize = 0;
    loop {
        let editor_done = scene_receiver.has_no_updater();
        if let Some(scene) = scene_receiver.latest() {
            manager.update(&mut device, FRAME_TIME.as_secs_f32(), &scene);
            manager.render(&mut device, &camera);
            frame_count += 1;
        }
        // one final frame after the editor finished so the last edit is rendered
        if editor_done {
            break;
        }
        thread::sleep(FRAME_TIME);
    }
    if editor_thread.join().is_err() {
        error!("scene editor thread panicked");
    }
    info!(
        "rendered {} frames with {} fragment program compilation(s)",
        frame_count,
        manager.recompile_count()
    );

    match shader_dir {
        Some(dir) => info!("generated shader source written to {}", dir.display()),
        None => {
            if let Some(source) = manager.fragment_program_source() {
                println!("{}", source);
            }
        }
    }

    if let Err(e) = save_render_settings(&save_dir, manager.settings()) {
        log_error_and_sources(&e, "save render settings");
    }
    Ok(())
}

fn save_dir() -> PathBuf {
    match std::env::var_os(ENV::SAVE_DIR) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(LOCAL_STORAGE_DIR),
    }
}

/// Rounded box with a sphere carved out of it, sitting on a slab, plus two lights
fn demo_scene() -> ObjectCollection {
    let mut collection = ObjectCollection::new();
    let objects = [
        ("carved sphere", SdfKind::Sphere, BoolOperator::Union, Vec3::new(0.0, 1.0, 0.0)),
        ("core box", SdfKind::Box, BoolOperator::Intersection, Vec3::new(0.0, 1.0, 0.0)),
        ("bore", SdfKind::Cylinder, BoolOperator::Subtraction, Vec3::new(0.0, 1.0, 0.0)),
        ("ground", SdfKind::Box, BoolOperator::Union, Vec3::new(0.0, -0.25, 0.0)),
        ("ring", SdfKind::Torus, BoolOperator::Union, Vec3::new(2.5, 0.5, 0.0)),
    ];
    for (name, kind, bool_operator, position) in objects {
        match collection.new_object(name, kind, bool_operator) {
            Ok(id) => {
                if let Ok(object) = collection.get_object_mut(id) {
                    object.transform.position = position;
                }
            }
            Err(e) => error!("failed to add demo object {}: {}", name, e),
        }
    }
    if let Some(ground) = collection.objects().get(3).map(|o| o.id()) {
        if let Ok(object) = collection.get_object_mut(ground) {
            object.parameters = Vec4::new(6.0, 0.25, 6.0, 0.0);
        }
    }

    for (name, position, colour) in [
        ("key light", Vec3::new(4.0, 6.0, -4.0), Vec3::new(1.0, 0.95, 0.9)),
        ("fill light", Vec3::new(-5.0, 3.0, -2.0), Vec3::new(0.4, 0.5, 0.7)),
    ] {
        match collection.new_light(name, position) {
            Ok(id) => {
                if let Ok(light) = collection.get_light_mut(id) {
                    light.colour = colour;
                }
            }
            Err(e) => error!("failed to add demo light {}: {}", name, e),
        }
    }
    collection
}
