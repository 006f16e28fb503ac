//! Text pass over a [`SceneProgram`].

use super::{csg_expr::CsgExpr, SceneProgram, NO_HIT_DISTANCE};
use crate::{
    config::{MIN_OBJECT_SCALE, RAYMARCH_MAX_LIGHTS, RAYMARCH_MAX_OBJECTS},
    engine::{
        object::operation::BoolOperator,
        primitives::glsl_fragments::{fragment, function_name},
    },
    renderer::shader_interfaces::{gpu_layout::glsl_buffer_declarations, scene_buffer::primitive_codes},
};
use std::fmt::Write;

pub const GLSL_VERSION_HEADER: &str = "#version 450\n";

const OBJECT_ACCESS_GLSL: &str = include_str!("../shaders/object_access.glsl");
const RAY_MARCH_MAIN_GLSL: &str = include_str!("../shaders/ray_march_main.glsl");

/// Renders a float so glsl parses it as a float literal without losing precision
pub fn glsl_float(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1.0e16 {
        format!("{:.1}", value)
    } else {
        // shortest round-trip form, e.g. `0.001` or `1e-7`
        format!("{:?}", value)
    }
}

/// Primitive helpers, the `primitive_distance` dispatcher and `scene_distance`
pub fn render_scene_functions(program: &SceneProgram) -> String {
    let mut source = String::new();
    for kind in &program.primitives {
        source.push_str(fragment(*kind));
        source.push('\n');
    }
    source.push_str(&render_primitive_distance(program));
    source.push('\n');
    source.push_str(&render_scene_distance(program));
    source
}

fn render_primitive_distance(program: &SceneProgram) -> String {
    let mut source =
        String::from("float primitive_distance(uint sdf_kind, vec3 p, vec4 parameters) {\n");
    for kind in &program.primitives {
        let _ = writeln!(
            source,
            "    if (sdf_kind == {}u) {{\n        return {}(p, parameters);\n    }}",
            kind.code(),
            function_name(*kind)
        );
    }
    source.push_str("    return NO_HIT_DISTANCE;\n}\n");
    source
}

fn render_scene_distance(program: &SceneProgram) -> String {
    let mut source = String::from("float scene_distance(vec3 p) {\n");
    match &program.root {
        None => source.push_str("    return NO_HIT_DISTANCE;\n"),
        Some(root) => {
            render_leaf_declarations(root, &mut source);
            render_fold_statements(root, &mut source);
            source.push_str("    return d;\n");
        }
    }
    source.push_str("}\n");
    source
}

fn render_leaf_declarations(expr: &CsgExpr, source: &mut String) {
    match expr {
        CsgExpr::Leaf { kind, slot } => {
            let _ = writeln!(
                source,
                "    float d{slot} = {}(object_point(p, {slot}), object_parameters({slot})) * object_distance_scale({slot});",
                function_name(*kind),
            );
        }
        CsgExpr::Boolean { left, right, .. } => {
            render_leaf_declarations(left, source);
            render_leaf_declarations(right, source);
        }
    }
}

/// Folds the left spine of `expr` into the running variable `d`, one statement per object.
/// The emitted statements never nest combinations.
fn render_fold_statements(expr: &CsgExpr, source: &mut String) {
    match expr {
        CsgExpr::Leaf { slot, .. } => {
            let _ = writeln!(source, "    float d = d{};", slot);
        }
        CsgExpr::Boolean { op, left, right } => {
            render_fold_statements(left, source);
            let _ = writeln!(source, "    d = {};", combine(*op, "d", &render_expr(right)));
        }
    }
}

/// Renders `expr` as a single glsl expression over the leaf variables `d<slot>`
pub fn render_expr(expr: &CsgExpr) -> String {
    match expr {
        CsgExpr::Leaf { slot, .. } => format!("d{}", slot),
        CsgExpr::Boolean { op, left, right } => {
            combine(*op, &render_expr(left), &render_expr(right))
        }
    }
}

fn combine(op: BoolOperator, left: &str, right: &str) -> String {
    match op {
        BoolOperator::Union => format!("min({}, {})", left, right),
        BoolOperator::Intersection => format!("max({}, {})", left, right),
        BoolOperator::Subtraction => format!("max({}, -{})", left, right),
    }
}

/// Constants shared by the static and generated glsl
pub fn render_constants() -> String {
    format!(
        "const int RAYMARCH_MAX_OBJECTS = {};\n\
         const int RAYMARCH_MAX_LIGHTS = {};\n\
         const uint NULL_SDF_KIND = {}u;\n\
         const float NO_HIT_DISTANCE = {};\n\
         const float MIN_OBJECT_SCALE = {};\n",
        RAYMARCH_MAX_OBJECTS,
        RAYMARCH_MAX_LIGHTS,
        primitive_codes::NULL,
        glsl_float(NO_HIT_DISTANCE),
        glsl_float(MIN_OBJECT_SCALE),
    )
}

/// Complete fragment program around the output of [`render_scene_functions`]
pub fn assemble_fragment_program(scene_functions: &str) -> String {
    let mut source = String::from(GLSL_VERSION_HEADER);
    source.push('\n');
    source.push_str(&render_constants());
    source.push('\n');
    source.push_str(&glsl_buffer_declarations());
    source.push('\n');
    source.push_str(OBJECT_ACCESS_GLSL);
    source.push('\n');
    source.push_str(scene_functions);
    source.push('\n');
    source.push_str(RAY_MARCH_MAIN_GLSL);
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{primitives::sdf_kind::SdfKind, snapshot::ObjectShape};

    #[test]
    fn empty_scene_returns_sentinel() {
        let source = render_scene_functions(&SceneProgram::compose(&[]));
        assert!(source.contains("float scene_distance(vec3 p) {\n    return NO_HIT_DISTANCE;\n}"));
        assert!(render_constants().contains("const float NO_HIT_DISTANCE = 1000000000.0;"));
    }

    #[test]
    fn single_object_is_its_fragment() {
        let program = SceneProgram::compose(&[ObjectShape::new(
            SdfKind::Box,
            BoolOperator::Subtraction,
        )]);
        let source = render_scene_functions(&program);
        assert!(source.starts_with(fragment(SdfKind::Box)));
        assert!(source.contains(
            "    float d0 = sd_box(object_point(p, 0), object_parameters(0)) * object_distance_scale(0);\n    float d = d0;\n    return d;\n"
        ));
    }

    #[test]
    fn union_then_subtract() {
        let program = SceneProgram::compose(&[
            ObjectShape::new(SdfKind::Sphere, BoolOperator::Intersection),
            ObjectShape::new(SdfKind::Box, BoolOperator::Union),
            ObjectShape::new(SdfKind::Sphere, BoolOperator::Subtraction),
        ]);
        let source = render_scene_functions(&program);
        assert!(source.contains(
            "    float d = d0;\n    d = min(d, d1);\n    d = max(d, -d2);\n    return d;\n"
        ));
        assert_eq!(render_expr(program.root.as_ref().unwrap()), "max(min(d0, d1), -d2)");
        assert_eq!(source.matches("float sd_sphere(").count(), 1);
        assert_eq!(source.matches("float sd_box(").count(), 1);
        assert!(source.contains("if (sdf_kind == 1u) {\n        return sd_sphere(p, parameters);"));
        assert!(source.contains("if (sdf_kind == 2u) {\n        return sd_box(p, parameters);"));
        assert!(!source.contains("sd_torus"));
    }

    #[test]
    fn intersection() {
        let program = SceneProgram::compose(&[
            ObjectShape::new(SdfKind::Cone, BoolOperator::Union),
            ObjectShape::new(SdfKind::Capsule, BoolOperator::Intersection),
        ]);
        let root = program.root.as_ref().unwrap();
        assert_eq!(render_expr(root), "max(d0, d1)");
        assert!(render_scene_functions(&program).contains("    d = max(d, d1);\n"));
    }

    #[test]
    fn full_scene_fold_is_flat() {
        let shapes: Vec<ObjectShape> = (0..RAYMARCH_MAX_OBJECTS)
            .map(|_| ObjectShape::new(SdfKind::Sphere, BoolOperator::Union))
            .collect();
        let source = render_scene_functions(&SceneProgram::compose(&shapes));
        assert_eq!(source.matches("    d = min(d, d").count(), RAYMARCH_MAX_OBJECTS - 1);
        assert!(source.contains("    d = min(d, d31);\n    return d;\n"));
        // no nested combination anywhere in scene_distance
        let scene_distance = &source[source.find("float scene_distance(").unwrap()..];
        assert!(!scene_distance.contains("min(min("));
    }

    #[test]
    fn floats_keep_their_precision() {
        assert_eq!(glsl_float(1.0e9), "1000000000.0");
        assert_eq!(glsl_float(2.0), "2.0");
        assert_eq!(glsl_float(0.001), "0.001");
        assert_eq!(glsl_float(-0.25), "-0.25");
        assert_eq!(glsl_float(1.0e-7), "1e-7");
        assert!(render_constants().contains("const float MIN_OBJECT_SCALE = 0.001;"));
    }

    #[test]
    fn program_starts_with_version_header() {
        let program = assemble_fragment_program(&render_scene_functions(&SceneProgram::compose(&[])));
        assert!(program.starts_with("#version 450\n"));
        assert!(program.contains("void main()"));
        let declarations = program.find("uniform RayMarchSceneBuffer").unwrap();
        let access = program.find("vec3 object_point(").unwrap();
        let scene_distance = program.find("float scene_distance(").unwrap();
        let main = program.find("void main()").unwrap();
        assert!(declarations < access && access < scene_distance && scene_distance < main);
    }
}
