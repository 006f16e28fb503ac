//! GLSL signed distance functions for each [`SdfKind`].
//!
//! Every fragment defines `float sd_<kind>(vec3 p, vec4 parameters)` and references nothing
//! but its two arguments and glsl builtins, so any subset can be concatenated in any order.

use super::sdf_kind::SdfKind;

pub fn function_name(kind: SdfKind) -> &'static str {
    match kind {
        SdfKind::Sphere => "sd_sphere",
        SdfKind::Box => "sd_box",
        SdfKind::Torus => "sd_torus",
        SdfKind::Cone => "sd_cone",
        SdfKind::Cylinder => "sd_cylinder",
        SdfKind::Capsule => "sd_capsule",
    }
}

/// Returns the glsl function definition for `kind`. Always the same text for the same kind.
pub fn fragment(kind: SdfKind) -> &'static str {
    match kind {
        SdfKind::Sphere => SPHERE,
        SdfKind::Box => BOX,
        SdfKind::Torus => TORUS,
        SdfKind::Cone => CONE,
        SdfKind::Cylinder => CYLINDER,
        SdfKind::Capsule => CAPSULE,
    }
}

const SPHERE: &str = "\
float sd_sphere(vec3 p, vec4 parameters) {
    return length(p) - parameters.x;
}
";

const BOX: &str = "\
float sd_box(vec3 p, vec4 parameters) {
    vec3 q = abs(p) - parameters.xyz;
    return length(max(q, vec3(0.0))) + min(max(q.x, max(q.y, q.z)), 0.0);
}
";

const TORUS: &str = "\
float sd_torus(vec3 p, vec4 parameters) {
    vec2 q = vec2(length(p.xz) - parameters.x, p.y);
    return length(q) - parameters.y;
}
";

// apex at the origin, base disc at y = -height
const CONE: &str = "\
float sd_cone(vec3 p, vec4 parameters) {
    vec2 q = vec2(parameters.y, -parameters.x);
    vec2 w = vec2(length(p.xz), p.y);
    vec2 a = w - q * clamp(dot(w, q) / dot(q, q), 0.0, 1.0);
    vec2 b = w - q * vec2(clamp(w.x / q.x, 0.0, 1.0), 1.0);
    float k = sign(q.y);
    float d = min(dot(a, a), dot(b, b));
    float s = max(k * (w.x * q.y - w.y * q.x), k * (w.y - q.y));
    return sqrt(d) * sign(s);
}
";

const CYLINDER: &str = "\
float sd_cylinder(vec3 p, vec4 parameters) {
    vec2 d = abs(vec2(length(p.xz), p.y)) - parameters.xy;
    return min(max(d.x, d.y), 0.0) + length(max(d, vec2(0.0)));
}
";

const CAPSULE: &str = "\
float sd_capsule(vec3 p, vec4 parameters) {
    vec3 q = vec3(p.x, p.y - clamp(p.y, -parameters.y, parameters.y), p.z);
    return length(q) - parameters.x;
}
";
