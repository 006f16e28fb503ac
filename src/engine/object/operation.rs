use crate::renderer::shader_interfaces::scene_buffer::{op_codes, SceneBufferUnit};
use serde::{Deserialize, Serialize};

/// How an object's distance combines with the running distance of the objects before it.
/// Ignored for the first object in the scene.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
pub enum BoolOperator {
    /// Combination of this primitive and current shape. Equivalent to OR.
    #[default]
    Union,
    /// Intersection of this primitive with current shape. Equivalent to AND.
    Intersection,
    /// Subtract this primitive from current shape.
    Subtraction,
}

static VARIANTS: &[BoolOperator] = &[
    BoolOperator::Union,
    BoolOperator::Intersection,
    BoolOperator::Subtraction,
];

impl BoolOperator {
    pub fn op_code(&self) -> SceneBufferUnit {
        match *self {
            Self::Union => op_codes::UNION,
            Self::Intersection => op_codes::INTERSECTION,
            Self::Subtraction => op_codes::SUBTRACTION,
        }
    }

    pub fn from_op_code(op_code: SceneBufferUnit) -> Option<Self> {
        match op_code {
            op_codes::UNION => Some(Self::Union),
            op_codes::INTERSECTION => Some(Self::Intersection),
            op_codes::SUBTRACTION => Some(Self::Subtraction),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Self::Union => "Add",
            Self::Intersection => "Intersect",
            Self::Subtraction => "Subtract",
        }
    }

    pub fn variant_names() -> Vec<(Self, &'static str)> {
        VARIANTS
            .iter()
            .map(|op| (*op, op.name()))
            .collect::<Vec<(Self, &'static str)>>()
    }

    /// Combines running distance `d` with distance `d_next` of the next object
    #[inline]
    pub fn combine(&self, d: f32, d_next: f32) -> f32 {
        match *self {
            Self::Union => d.min(d_next),
            Self::Intersection => d.max(d_next),
            Self::Subtraction => d.max(-d_next),
        }
    }
}
