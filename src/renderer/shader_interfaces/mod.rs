pub mod bindings;
pub mod camera_uniform_buffer;
pub mod gpu_layout;
pub mod light_buffer;
pub mod render_settings_buffer;
pub mod scene_buffer;
