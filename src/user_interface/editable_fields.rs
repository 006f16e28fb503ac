use super::EditState;
use crate::{
    config::{
        self, AMBIENT_OCCLUSION_STRENGTH_RANGE, DRAG_INC, INTERSECTION_THRESHOLD_RANGE,
        MAX_DISTANCE_RANGE, MAX_STEPS_RANGE, MIN_OBJECT_SCALE,
    },
    engine::{
        object::{
            light::RayMarchLight, material::Material, object::RayMarchObject,
            operation::BoolOperator, transform::Transform,
        },
        primitives::sdf_kind::SdfKind,
        settings::RenderSettings,
    },
    renderer::shader_interfaces::scene_buffer::{primitive_codes, SceneBufferUnit},
};
use egui::{ComboBox, DragValue};
use glam::Vec3;

pub fn render_settings_editor_ui(ui: &mut egui::Ui, settings: &mut RenderSettings) -> EditState {
    let mut something_changed: bool = false;

    let mut max_steps = settings.max_steps();
    ui.horizontal(|ui| {
        ui.label("Max Steps:");
        something_changed |= ui
            .add(
                DragValue::new(&mut max_steps)
                    .speed(config::DRAG_SPEED_MAX_STEPS)
                    .clamp_range(MAX_STEPS_RANGE.0..=MAX_STEPS_RANGE.1),
            )
            .changed();
    });

    let mut max_distance = settings.max_distance();
    ui.horizontal(|ui| {
        ui.label("Max Dist:");
        something_changed |= ui
            .add(
                DragValue::new(&mut max_distance)
                    .speed(config::DRAG_SPEED_MAX_DISTANCE)
                    .clamp_range(MAX_DISTANCE_RANGE.0..=MAX_DISTANCE_RANGE.1),
            )
            .changed();
    });

    let mut intersection_threshold = settings.intersection_threshold();
    ui.horizontal(|ui| {
        ui.label("Threshold:");
        something_changed |= ui
            .add(
                DragValue::new(&mut intersection_threshold)
                    .speed(config::DRAG_SPEED_INTERSECTION_THRESHOLD)
                    .clamp_range(INTERSECTION_THRESHOLD_RANGE.0..=INTERSECTION_THRESHOLD_RANGE.1)
                    .max_decimals(4),
            )
            .changed();
    });

    let mut ambient_occlusion_strength = settings.ambient_occlusion_strength();
    ui.horizontal(|ui| {
        ui.label("AO Strength:");
        something_changed |= ui
            .add(
                DragValue::new(&mut ambient_occlusion_strength)
                    .speed(config::DRAG_SPEED_AMBIENT_OCCLUSION_STRENGTH)
                    .clamp_range(
                        AMBIENT_OCCLUSION_STRENGTH_RANGE.0..=AMBIENT_OCCLUSION_STRENGTH_RANGE.1,
                    ),
            )
            .changed();
    });

    if something_changed {
        settings.set_max_steps(max_steps);
        settings.set_max_distance(max_distance);
        settings.set_intersection_threshold(intersection_threshold);
        settings.set_ambient_occlusion_strength(ambient_occlusion_strength);
    }
    EditState::from_changed(something_changed)
}

pub fn ray_march_object_editor_ui(ui: &mut egui::Ui, object: &mut RayMarchObject) -> EditState {
    let mut something_changed = false;

    ui.horizontal(|ui| {
        ui.label("Name:");
        // name isn't sent to the gpu
        ui.text_edit_singleline(&mut object.name);
    });
    something_changed |= ui.checkbox(&mut object.active, "Is Active").changed();

    let edit_state = sdf_kind_editor_ui(ui, &mut object.sdf_kind)
        .combine(parameters_editor_ui(ui, object))
        .combine(bool_operator_editor_ui(ui, object))
        .combine(transform_editor_ui(ui, &mut object.transform))
        .combine(material_editor_ui(ui, &mut object.material));

    edit_state.combine(EditState::from_changed(something_changed))
}

fn sdf_kind_editor_ui(ui: &mut egui::Ui, sdf_kind: &mut SceneBufferUnit) -> EditState {
    let mut something_changed = false;
    ui.horizontal(|ui| {
        ui.label("SDF Type:");
        something_changed |= ui
            .add(
                DragValue::new(sdf_kind)
                    .speed(0.05)
                    .clamp_range(primitive_codes::NULL..=primitive_codes::CAPSULE),
            )
            .changed();
        match SdfKind::from_code(*sdf_kind) {
            Ok(kind) => ui.label(kind.name()),
            Err(_) => ui.label("Unsupported"),
        };
    });
    EditState::from_changed(something_changed)
}

fn parameters_editor_ui(ui: &mut egui::Ui, object: &mut RayMarchObject) -> EditState {
    let mut something_changed = false;

    let labels = match object.kind() {
        Ok(kind) => kind.parameter_labels(),
        Err(_) => [
            Some("Parameter 0"),
            Some("Parameter 1"),
            Some("Parameter 2"),
            Some("Parameter 3"),
        ],
    };
    for (index, label) in labels.iter().enumerate() {
        if let Some(label) = label {
            ui.horizontal(|ui| {
                ui.label(format!("{}:", label));
                something_changed |= ui
                    .add(
                        DragValue::new(&mut object.parameters[index])
                            .speed(DRAG_INC)
                            .clamp_range(0.0..=f32::MAX),
                    )
                    .changed();
            });
        }
    }
    EditState::from_changed(something_changed)
}

fn bool_operator_editor_ui(ui: &mut egui::Ui, object: &mut RayMarchObject) -> EditState {
    let mut something_changed = false;
    let mut selected: BoolOperator = object.bool_operator;
    ui.horizontal(|ui| {
        ui.label("Bool Operator:");
        ComboBox::from_id_source(format!("bool operator drop down {}", object.id()))
            .selected_text(selected.name())
            .show_ui(ui, |ui_op| {
                for (op, op_name) in BoolOperator::variant_names() {
                    ui_op.selectable_value(&mut selected, op, op_name);
                }
            });
    });
    if selected != object.bool_operator {
        object.bool_operator = selected;
        something_changed = true;
    }
    EditState::from_changed(something_changed)
}

fn vec3_editor_ui(ui: &mut egui::Ui, label: &str, value: &mut Vec3, min: f32) -> bool {
    let mut something_changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        for component in [&mut value.x, &mut value.y, &mut value.z] {
            something_changed |= ui
                .add(
                    DragValue::new(component)
                        .speed(DRAG_INC)
                        .clamp_range(min..=f32::MAX),
                )
                .changed();
        }
    });
    something_changed
}

pub fn transform_editor_ui(ui: &mut egui::Ui, transform: &mut Transform) -> EditState {
    let mut something_changed = false;
    something_changed |= vec3_editor_ui(ui, "Position:", &mut transform.position, f32::MIN);
    something_changed |= vec3_editor_ui(ui, "Rotation:", &mut transform.rotation, f32::MIN);
    something_changed |= vec3_editor_ui(ui, "Scale:", &mut transform.scale, MIN_OBJECT_SCALE);
    EditState::from_changed(something_changed)
}

pub fn material_editor_ui(ui: &mut egui::Ui, material: &mut Material) -> EditState {
    let mut something_changed = false;

    let mut colour = material.colour.to_array();
    ui.horizontal(|ui| {
        ui.label("Colour:");
        something_changed |= ui.color_edit_button_rgb(&mut colour).changed();
    });
    material.colour = Vec3::from_array(colour);

    ui.horizontal(|ui| {
        ui.label("Metalicness:");
        something_changed |= ui
            .add(
                DragValue::new(&mut material.metalicness)
                    .speed(DRAG_INC)
                    .clamp_range(0.0..=1.0),
            )
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label("Roughness:");
        something_changed |= ui
            .add(
                DragValue::new(&mut material.roughness)
                    .speed(DRAG_INC)
                    .clamp_range(0.0..=1.0),
            )
            .changed();
    });
    EditState::from_changed(something_changed)
}

pub fn ray_march_light_editor_ui(ui: &mut egui::Ui, light: &mut RayMarchLight) -> EditState {
    let mut something_changed = false;

    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.text_edit_singleline(&mut light.name);
    });
    something_changed |= ui.checkbox(&mut light.active, "Is Active").changed();
    something_changed |= vec3_editor_ui(ui, "Position:", &mut light.position, f32::MIN);

    let mut colour = light.colour.to_array();
    ui.horizontal(|ui| {
        ui.label("Colour:");
        something_changed |= ui.color_edit_button_rgb(&mut colour).changed();
    });
    light.colour = Vec3::from_array(colour);

    for (label, value) in [
        ("Shadow Sharpness:", &mut light.shadow_sharpness),
        ("Constant Attenuation:", &mut light.constant_attenuation),
        ("Linear Attenuation:", &mut light.linear_attenuation),
        ("Quadratic Attenuation:", &mut light.quadratic_attenuation),
    ] {
        ui.horizontal(|ui| {
            ui.label(label);
            something_changed |= ui
                .add(
                    DragValue::new(value)
                        .speed(DRAG_INC)
                        .clamp_range(0.0..=f32::MAX),
                )
                .changed();
        });
    }
    EditState::from_changed(something_changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::object::object_collection::ObjectCollection;

    fn run_ui(mut add_contents: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| add_contents(ui));
        });
    }

    #[test]
    fn untouched_settings_editor_reports_no_change() {
        let mut settings = RenderSettings::default();
        let mut edit_state = EditState::Modified;
        run_ui(|ui| edit_state = render_settings_editor_ui(ui, &mut settings));
        assert_eq!(edit_state, EditState::NoChange);
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn object_and_light_editors_show_every_kind() {
        let mut collection = ObjectCollection::new();
        let light_id = collection.new_light("light", Vec3::Y).unwrap();
        let mut object_ids = Vec::new();
        for kind in SdfKind::VARIANTS {
            object_ids.push(
                collection
                    .new_object(kind.name(), *kind, BoolOperator::Subtraction)
                    .unwrap(),
            );
        }
        // unsupported codes still get an editor
        collection.get_object_mut(object_ids[0]).unwrap().sdf_kind = primitive_codes::NULL;
        let before = collection.clone();

        let mut edit_state = EditState::NoChange;
        run_ui(|ui| {
            for object_id in &object_ids {
                let object = collection.get_object_mut(*object_id).unwrap();
                edit_state = edit_state.combine(ray_march_object_editor_ui(ui, object));
            }
            let light = collection.get_light_mut(light_id).unwrap();
            edit_state = edit_state.combine(ray_march_light_editor_ui(ui, light));
        });
        assert_eq!(edit_state, EditState::NoChange);
        assert_eq!(collection.objects(), before.objects());
        assert_eq!(collection.lights(), before.lights());
    }

    #[test]
    fn edit_state_combine() {
        assert_eq!(
            EditState::NoChange.combine(EditState::Modified),
            EditState::Modified
        );
        assert_eq!(
            EditState::NoChange.combine(EditState::NoChange),
            EditState::NoChange
        );
    }
}
