//! Composes ray-marched signed distance field scenes into glsl fragment programs.
//!
//! A [`renderer::ray_marching_manager::RayMarchingManager`] takes a snapshot of an
//! [`engine::object::object_collection::ObjectCollection`] every frame, regenerates the fragment
//! program only when the scene's structure changes and repacks every numeric value into
//! fixed-layout constant buffers.

pub mod config;
pub mod engine;
pub mod helper;
pub mod renderer;
pub mod user_interface;
