use crate::{
    engine::{
        object::{operation::BoolOperator, transform::Transform},
        primitives::sdf_kind::SdfKind,
        snapshot::ObjectShape,
    },
    renderer::shader_interfaces::scene_buffer::{ObjectRecord, RayMarchSceneBuffer},
};
use glam::{Vec3, Vec4};

/// Expression tree of the scene distance function. Leaves read their numeric state from scene
/// buffer slot `slot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsgExpr {
    Leaf {
        kind: SdfKind,
        slot: usize,
    },
    Boolean {
        op: BoolOperator,
        left: Box<CsgExpr>,
        right: Box<CsgExpr>,
    },
}

impl CsgExpr {
    /// Left fold over `shapes` in list order. The first shape's operator is ignored.
    /// Returns `None` for an empty scene.
    pub fn fold(shapes: &[ObjectShape]) -> Option<Self> {
        let (first, rest) = shapes.split_first()?;
        let mut expr = Self::Leaf {
            kind: first.kind,
            slot: 0,
        };
        for (index, shape) in rest.iter().enumerate() {
            expr = Self::Boolean {
                op: shape.bool_operator,
                left: Box::new(expr),
                right: Box::new(Self::Leaf {
                    kind: shape.kind,
                    slot: index + 1,
                }),
            };
        }
        Some(expr)
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Boolean { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Cpu reference evaluation of the tree at world space point `p`
    pub fn evaluate(&self, p: Vec3, scene: &RayMarchSceneBuffer) -> f32 {
        match self {
            Self::Leaf { kind, slot } => leaf_distance(*kind, &scene.objects[*slot], p),
            Self::Boolean { op, left, right } => {
                op.combine(left.evaluate(p, scene), right.evaluate(p, scene))
            }
        }
    }
}

fn leaf_distance(kind: SdfKind, record: &ObjectRecord, p: Vec3) -> f32 {
    let transform = Transform {
        position: Vec3::from_array(record.position),
        rotation: Vec3::from_array(record.rotation),
        scale: Vec3::from_array(record.scale),
    };
    let local = transform.world_to_local(p);
    kind.distance(local, Vec4::from_array(record.parameters)) * transform.distance_scale()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: SdfKind, slot: usize) -> Box<CsgExpr> {
        Box::new(CsgExpr::Leaf { kind, slot })
    }

    #[test]
    fn fold_is_left_associative() {
        let shapes = [
            ObjectShape::new(SdfKind::Sphere, BoolOperator::Subtraction),
            ObjectShape::new(SdfKind::Box, BoolOperator::Union),
            ObjectShape::new(SdfKind::Torus, BoolOperator::Subtraction),
        ];
        let expected = CsgExpr::Boolean {
            op: BoolOperator::Subtraction,
            left: Box::new(CsgExpr::Boolean {
                op: BoolOperator::Union,
                left: leaf(SdfKind::Sphere, 0),
                right: leaf(SdfKind::Box, 1),
            }),
            right: leaf(SdfKind::Torus, 2),
        };
        let expr = CsgExpr::fold(&shapes).unwrap();
        assert_eq!(expr, expected);
        assert_eq!(expr.leaf_count(), 3);
        assert_eq!(CsgExpr::fold(&[]), None);
    }

    #[test]
    fn evaluate_subtraction() {
        let mut scene = RayMarchSceneBuffer::default();
        for (slot, radius) in [(0, 2.0), (1, 1.0)] {
            scene.objects[slot] = ObjectRecord {
                sdf_kind: SdfKind::Sphere.code(),
                scale: [1.0; 3],
                parameters: [radius, 0.0, 0.0, 0.0],
                ..Default::default()
            };
        }
        let expr = CsgExpr::Boolean {
            op: BoolOperator::Subtraction,
            left: leaf(SdfKind::Sphere, 0),
            right: leaf(SdfKind::Sphere, 1),
        };
        // the origin is carved out: inside the small sphere
        assert!((expr.evaluate(Vec3::ZERO, &scene) - 1.0).abs() < 1e-5);
        // a point in the remaining shell
        assert!(expr.evaluate(Vec3::new(1.5, 0.0, 0.0), &scene) < 0.0);
    }
}
