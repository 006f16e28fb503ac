use super::settings::RenderSettings;
use crate::{
    config::{PRECURSOR_BYTES, PRECURSOR_BYTE_COUNT, SAVE_STATE_FILENAME_RENDER_SETTINGS},
    helper::more_errors::SaveStateError,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ~~ Public ~~

pub fn save_render_settings(
    save_dir: impl AsRef<Path>,
    render_settings: &RenderSettings,
) -> Result<(), SaveStateError> {
    save_state(
        save_dir.as_ref(),
        render_settings,
        SAVE_STATE_FILENAME_RENDER_SETTINGS,
    )
}

pub fn load_render_settings(save_dir: impl AsRef<Path>) -> Result<RenderSettings, SaveStateError> {
    load_state::<RenderSettings>(save_dir.as_ref(), SAVE_STATE_FILENAME_RENDER_SETTINGS)
}

// ~~ Private ~~

fn save_state(
    save_dir: &Path,
    to_serialize: &impl Serialize,
    file_name: &str,
) -> Result<(), SaveStateError> {
    let encoded_bytes = bincode::serialize(to_serialize).map_err(SaveStateError::SerializeFailed)?;
    save_state_bytes(save_dir, file_name, encoded_bytes)
}

fn save_state_bytes(
    save_dir: &Path,
    file_name: &str,
    mut encoded_bytes: Vec<u8>,
) -> Result<(), SaveStateError> {
    // prepend encoded bytes with engine info
    let mut write_bytes = PRECURSOR_BYTES.to_vec();
    write_bytes.append(&mut encoded_bytes);

    let file_path = validated_file_path(save_dir, file_name)?;
    fs::write(&file_path, write_bytes)
        .map_err(|e| SaveStateError::WriteFileFailed(file_path.display().to_string(), e))?;
    Ok(())
}

fn load_state<T>(save_dir: &Path, file_name: &str) -> Result<T, SaveStateError>
where
    T: DeserializeOwned,
{
    let encoded_bytes = load_state_bytes(save_dir, file_name)?;
    bincode::deserialize::<T>(&encoded_bytes).map_err(SaveStateError::DeserializeFailed)
}

fn load_state_bytes(save_dir: &Path, file_name: &str) -> Result<Vec<u8>, SaveStateError> {
    let file_path = save_dir.join(file_name);
    let file_path_string = file_path.display().to_string();

    let mut read_bytes = fs::read(&file_path)
        .map_err(|io_error| SaveStateError::read_file_error(io_error, file_path_string.clone()))?;

    if !read_bytes.starts_with(PRECURSOR_BYTES) {
        return Err(SaveStateError::InvalidPrecursor(file_path_string));
    }
    let _read_precursor_bytes: Vec<u8> = read_bytes.drain(0..PRECURSOR_BYTE_COUNT).collect();
    Ok(read_bytes)
}

/// Ensures containing directories exist, but not the actual file
fn validated_file_path(save_dir: &Path, file_name: &str) -> Result<PathBuf, SaveStateError> {
    fs::create_dir_all(save_dir).map_err(|e| {
        SaveStateError::CreateDirectoryFailed(save_dir.display().to_string(), e)
    })?;
    Ok(save_dir.join(file_name))
}

// ~~ Tests ~~
