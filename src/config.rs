use log::LevelFilter;

pub const ENGINE_NAME: &str = "SDF Composer";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variables that can be used to configure the composer
#[allow(non_snake_case)]
pub mod ENV {
    /// Set to one of `error`, `warn`, `info`, `debug` or `trace` to override the log level
    pub const LOG_LEVEL: &str = "SDF_COMPOSER_LOG";
    /// Set to a directory path to have generated shader source written there
    pub const SHADER_DIR: &str = "SDF_COMPOSER_SHADER_DIR";
    /// Set to a directory path to change where render settings are saved
    pub const SAVE_DIR: &str = "SDF_COMPOSER_SAVE_DIR";
}

/// Log level filter. Log messages with lower levels than this will not be displayed.
#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Maximum number of ray-march objects the scene buffer holds.
///
/// _Must match `RAYMARCH_MAX_OBJECTS` in the generated fragment program_
pub const RAYMARCH_MAX_OBJECTS: usize = 32;
/// Maximum number of lights the light buffer holds.
///
/// _Must match `RAYMARCH_MAX_LIGHTS` in the generated fragment program_
pub const RAYMARCH_MAX_LIGHTS: usize = 8;

// ~~ Render Settings ~~

pub const MAX_STEPS_RANGE: (u32, u32) = (1, 1000);
pub const MAX_DISTANCE_RANGE: (f32, f32) = (1.0, 10000.0);
pub const INTERSECTION_THRESHOLD_RANGE: (f32, f32) = (0.0001, 0.3);
pub const AMBIENT_OCCLUSION_STRENGTH_RANGE: (f32, f32) = (0.005, 10.0);

pub const DEFAULT_MAX_STEPS: u32 = 256;
pub const DEFAULT_MAX_DISTANCE: f32 = 100.0;
pub const DEFAULT_INTERSECTION_THRESHOLD: f32 = 0.001;
pub const DEFAULT_AMBIENT_OCCLUSION_STRENGTH: f32 = 0.5;

// ~~ Gui ~~

/// Drag speeds of the render settings widgets
pub const DRAG_SPEED_MAX_STEPS: f64 = 1.0;
pub const DRAG_SPEED_MAX_DISTANCE: f64 = 0.5;
pub const DRAG_SPEED_INTERSECTION_THRESHOLD: f64 = 0.0001;
pub const DRAG_SPEED_AMBIENT_OCCLUSION_STRENGTH: f64 = 0.001;
/// Amount to increment when dragging per-object values
pub const DRAG_INC: f64 = 0.005;

/// Smallest scale an object transform may be given. Scale divides the sample point on the gpu.
pub const MIN_OBJECT_SCALE: f32 = 0.001;

// ~~ Save States ~~

pub const LOCAL_STORAGE_DIR: &str = ".sdf-composer";
pub const SAVE_STATE_FILENAME_RENDER_SETTINGS: &str = "render_settings.gsave";
/// Bytes written at the start of every save file. Engine name followed by version.
pub const PRECURSOR_BYTES: &[u8] =
    concat!("SDF Composer ", env!("CARGO_PKG_VERSION"), ";").as_bytes();
pub const PRECURSOR_BYTE_COUNT: usize = PRECURSOR_BYTES.len();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precursor_tracks_engine_name_and_version() {
        let expected = format!("{} {};", ENGINE_NAME, ENGINE_VERSION);
        assert_eq!(PRECURSOR_BYTES, expected.as_bytes());
        assert_eq!(PRECURSOR_BYTE_COUNT, expected.len());
    }
}
