use super::{object::object::ObjectId, snapshot::CapacityPolicy};
use crate::renderer::shader_interfaces::scene_buffer::SceneBufferUnit;
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEntity {
    Object,
    Light,
}

impl fmt::Display for SceneEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "ray-march objects"),
            Self::Light => write!(f, "lights"),
        }
    }
}

/// Recoverable problems found while taking a scene snapshot. The affected entities are left
/// out of the frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneWarning {
    #[error("object {object_id} has unsupported primitive kind code {code} and was excluded")]
    UnsupportedPrimitiveKind {
        object_id: ObjectId,
        code: SceneBufferUnit,
    },
    #[error("{requested} active {entity} exceed capacity {capacity}, excess dropped ({policy})")]
    SceneCapacityExceeded {
        entity: SceneEntity,
        requested: usize,
        capacity: usize,
        policy: CapacityPolicy,
    },
}

/// Failure to install a fragment program for a new scene structure. The previous program stays
/// bound.
#[derive(Debug, Error)]
pub enum RecompileError {
    #[error("fragment program compilation failed")]
    ShaderCompilationFailed(#[source] anyhow::Error),
    #[error("failed to write generated shader source to {path}")]
    GeneratedSourceWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
