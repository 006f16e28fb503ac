//! Turns the structural view of a scene snapshot into the generated part of the fragment
//! program.

pub mod csg_expr;
pub mod glsl;

use crate::{
    engine::{primitives::sdf_kind::SdfKind, snapshot::ObjectShape},
    renderer::shader_interfaces::scene_buffer::RayMarchSceneBuffer,
};
use csg_expr::CsgExpr;
use glam::Vec3;

/// Distance returned by `scene_distance` when the scene has no objects
pub const NO_HIT_DISTANCE: f32 = 1.0e9;

/// Composed scene: distinct primitive kinds in first-use order plus the fold expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneProgram {
    pub primitives: Vec<SdfKind>,
    pub root: Option<CsgExpr>,
}

impl SceneProgram {
    /// Never reads numeric object state, only kinds and operators.
    pub fn compose(shapes: &[ObjectShape]) -> Self {
        Self {
            primitives: distinct_kinds(shapes),
            root: CsgExpr::fold(shapes),
        }
    }

    pub fn object_count(&self) -> usize {
        self.root.as_ref().map_or(0, CsgExpr::leaf_count)
    }

    pub fn evaluate(&self, p: Vec3, scene: &RayMarchSceneBuffer) -> f32 {
        match &self.root {
            Some(root) => root.evaluate(p, scene),
            None => NO_HIT_DISTANCE,
        }
    }

    pub fn glsl(&self) -> String {
        glsl::render_scene_functions(self)
    }
}

/// Kinds of `shapes` without repeats, in order of first appearance
pub fn distinct_kinds(shapes: &[ObjectShape]) -> Vec<SdfKind> {
    let mut kinds: Vec<SdfKind> = Vec::new();
    for shape in shapes {
        if !kinds.contains(&shape.kind) {
            kinds.push(shape.kind);
        }
    }
    kinds
}
