pub mod glsl_fragments;
pub mod sdf_kind;
