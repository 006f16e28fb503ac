use super::unique_id_gen::UniqueId;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {index} out of bounds. size = {size}")]
    OutOfBounds { index: usize, size: usize },
    #[error("invalid id {raw_id}")]
    InvalidId { raw_id: UniqueId },
}

#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("failed to create directory {0}")]
    CreateDirectoryFailed(String, #[source] io::Error),
    #[error("failed to write file {0}")]
    WriteFileFailed(String, #[source] io::Error),
    #[error("file {0} not found")]
    FileNotFound(String),
    #[error("failed to read file {0}")]
    ReadFileFailed(String, #[source] io::Error),
    #[error("file {0} does not start with the expected precursor bytes")]
    InvalidPrecursor(String),
    #[error("failed to serialize save state")]
    SerializeFailed(#[source] bincode::Error),
    #[error("failed to deserialize save state")]
    DeserializeFailed(#[source] bincode::Error),
}

impl SaveStateError {
    pub fn read_file_error(io_error: io::Error, file_path: String) -> Self {
        if io_error.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound(file_path)
        } else {
            Self::ReadFileFailed(file_path, io_error)
        }
    }
}
