pub mod anyhow_panic;
pub mod logger;
pub mod more_errors;
pub mod unique_id_gen;
