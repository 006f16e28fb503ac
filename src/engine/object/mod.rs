pub mod light;
pub mod material;
pub mod object;
pub mod object_collection;
pub mod operation;
pub mod transform;
