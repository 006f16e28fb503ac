use super::recompile_cache::GeneratedSourceTarget;
use crate::{config::ENV, engine::snapshot::CapacityPolicy};
use std::path::PathBuf;

/// Debug label of each constant buffer created by the manager
#[allow(non_snake_case)]
pub mod BUFFER_LABEL {
    pub const RENDER_SETTINGS: &str = "ray march render settings";
    pub const CAMERA: &str = "ray march camera";
    pub const SCENE: &str = "ray march scene objects";
    pub const LIGHTS: &str = "ray march lights";
}

/// Per-manager options
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManagerConfig {
    pub capacity_policy: CapacityPolicy,
    pub generated_source_target: GeneratedSourceTarget,
}

impl ManagerConfig {
    /// Defaults, with the generated source written to [`ENV::SHADER_DIR`] when it is set
    pub fn from_env() -> Self {
        let generated_source_target = match std::env::var_os(ENV::SHADER_DIR) {
            Some(dir) if !dir.is_empty() => GeneratedSourceTarget::Directory(PathBuf::from(dir)),
            _ => GeneratedSourceTarget::InMemory,
        };
        Self {
            generated_source_target,
            ..Default::default()
        }
    }
}
