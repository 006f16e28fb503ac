pub mod camera;
pub mod object;
pub mod primitives;
pub mod save_states;
pub mod scene_channel;
pub mod scene_errors;
pub mod settings;
pub mod snapshot;
