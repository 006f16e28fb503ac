//! Descriptor bindings of the generated fragment program.
//!
//! _Must match the `layout(binding = ..)` qualifiers rendered by [`super::gpu_layout`]_

pub const DESCRIPTOR_SET: u32 = 0;

pub const RENDER_SETTINGS: u32 = 0;
pub const CAMERA: u32 = 1;
pub const SCENE: u32 = 2;
pub const LIGHTS: u32 = 3;
