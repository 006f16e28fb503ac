pub mod buffer_packer;
pub mod composer;
pub mod config_renderer;
pub mod headless_device;
pub mod ray_marching_manager;
pub mod recompile_cache;
pub mod render_device;
pub mod shader_interfaces;
