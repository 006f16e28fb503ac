use super::{
    composer::{glsl::assemble_fragment_program, SceneProgram},
    render_device::RenderDevice,
};
use crate::engine::{
    primitives::{glsl_fragments::fragment, sdf_kind::SdfKind},
    scene_errors::RecompileError,
    snapshot::ObjectShape,
};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use std::{
    fs,
    hash::{BuildHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

pub const SCENE_DISTANCE_FILENAME: &str = "scene_distance.glsl";
pub const FRAGMENT_PROGRAM_FILENAME: &str = "ray_march.frag";

// fixed so fingerprints are reproducible across runs
const FINGERPRINT_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

fn fingerprint_hasher() -> ahash::AHasher {
    ahash::RandomState::with_seeds(
        FINGERPRINT_SEEDS[0],
        FINGERPRINT_SEEDS[1],
        FINGERPRINT_SEEDS[2],
        FINGERPRINT_SEEDS[3],
    )
    .build_hasher()
}

/// Summary of the structural shape of a scene. Equal fingerprints compose to identical
/// fragment programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneFingerprint {
    /// Digest of the distinct primitive fragments in first-use order
    fragment_digest: u64,
    object_count: usize,
    operator_code_sum: u32,
    /// Digest of the ordered (kind, operator) sequence
    structure_digest: u64,
}

impl SceneFingerprint {
    pub fn compute(shapes: &[ObjectShape]) -> Self {
        let mut fragment_hasher = fingerprint_hasher();
        let mut emitted: Vec<SdfKind> = Vec::new();
        for shape in shapes {
            if !emitted.contains(&shape.kind) {
                emitted.push(shape.kind);
                fragment(shape.kind).hash(&mut fragment_hasher);
            }
        }

        let mut structure_hasher = fingerprint_hasher();
        let mut operator_code_sum: u32 = 0;
        for shape in shapes {
            let op_code = shape.bool_operator.op_code();
            operator_code_sum = operator_code_sum.wrapping_add(op_code);
            (shape.kind.code(), op_code).hash(&mut structure_hasher);
        }

        Self {
            fragment_digest: fragment_hasher.finish(),
            object_count: shapes.len(),
            operator_code_sum,
            structure_digest: structure_hasher.finish(),
        }
    }

    pub fn object_count(&self) -> usize {
        self.object_count
    }

    pub fn operator_code_sum(&self) -> u32 {
        self.operator_code_sum
    }
}

/// No previous fingerprint always recompiles
pub fn should_recompile(previous: Option<&SceneFingerprint>, next: &SceneFingerprint) -> bool {
    previous != Some(next)
}

/// Where generated source is written besides being handed to the device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeneratedSourceTarget {
    #[default]
    InMemory,
    /// Writes [`SCENE_DISTANCE_FILENAME`] and [`FRAGMENT_PROGRAM_FILENAME`] into the directory
    Directory(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecompileOutcome {
    Unchanged,
    Recompiled,
}

/// Fingerprint of the last attempted structure and the program compiled for the last
/// successful one. One per manager.
pub struct RecompilationCache<H> {
    fingerprint: Option<SceneFingerprint>,
    compiled_program: Option<H>,
    latest_source: Option<String>,
    recompile_count: usize,
    target: GeneratedSourceTarget,
}

impl<H> RecompilationCache<H> {
    pub fn new(target: GeneratedSourceTarget) -> Self {
        Self {
            fingerprint: None,
            compiled_program: None,
            latest_source: None,
            recompile_count: 0,
            target,
        }
    }

    /// Recompiles when the fingerprint of `shapes` differs from the last attempt. On failure
    /// the new fingerprint is still recorded and the previous program stays installed.
    pub fn refresh<D>(
        &mut self,
        device: &mut D,
        shapes: &[ObjectShape],
    ) -> Result<RecompileOutcome, RecompileError>
    where
        D: RenderDevice<ProgramHandle = H>,
    {
        let next = SceneFingerprint::compute(shapes);
        if !should_recompile(self.fingerprint.as_ref(), &next) {
            return Ok(RecompileOutcome::Unchanged);
        }
        self.fingerprint = Some(next);
        self.recompile_count += 1;

        debug!(
            "scene structure changed ({} objects), regenerating fragment program",
            next.object_count()
        );
        let scene_functions = SceneProgram::compose(shapes).glsl();
        let source = assemble_fragment_program(&scene_functions);
        self.latest_source = Some(source.clone());

        if let GeneratedSourceTarget::Directory(dir) = &self.target {
            write_generated_source(dir, &scene_functions, &source)?;
        }

        let program = device
            .compile_fragment_program(&source)
            .map_err(RecompileError::ShaderCompilationFailed)?;
        device.set_fragment_program(&program);
        self.compiled_program = Some(program);
        Ok(RecompileOutcome::Recompiled)
    }

    pub fn fingerprint(&self) -> Option<&SceneFingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn compiled_program(&self) -> Option<&H> {
        self.compiled_program.as_ref()
    }

    /// Fragment program generated by the most recent recompilation attempt
    pub fn latest_source(&self) -> Option<&str> {
        self.latest_source.as_deref()
    }

    /// Number of fingerprint changes acted on so far, including failed attempts
    pub fn recompile_count(&self) -> usize {
        self.recompile_count
    }

    pub fn target(&self) -> &GeneratedSourceTarget {
        &self.target
    }
}

fn write_generated_source(
    dir: &Path,
    scene_functions: &str,
    fragment_program: &str,
) -> Result<(), RecompileError> {
    fs::create_dir_all(dir).map_err(|source| RecompileError::GeneratedSourceWriteFailed {
        path: dir.to_path_buf(),
        source,
    })?;
    for (file_name, contents) in [
        (SCENE_DISTANCE_FILENAME, scene_functions),
        (FRAGMENT_PROGRAM_FILENAME, fragment_program),
    ] {
        let path = dir.join(file_name);
        fs::write(&path, contents)
            .map_err(|source| RecompileError::GeneratedSourceWriteFailed { path, source })?;
    }
    Ok(())
}
