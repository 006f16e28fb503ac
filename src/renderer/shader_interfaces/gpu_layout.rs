//! Binding contract between the host-side buffer structs and the glsl declarations.
//!
//! Each mirrored struct lists its fields once in [`GpuRecord::FIELDS`]. The glsl declarations
//! in the generated fragment program are rendered from that table, and [`assert_buffer_layouts`]
//! checks the table's std140 offsets against the actual `#[repr(C)]` struct offsets.

use super::{
    bindings,
    camera_uniform_buffer::CameraUniformBuffer,
    light_buffer::{LightRecord, RayMarchLightBuffer},
    render_settings_buffer::RenderSettingsBuffer,
    scene_buffer::{ObjectRecord, RayMarchSceneBuffer},
};
use crate::config::{RAYMARCH_MAX_LIGHTS, RAYMARCH_MAX_OBJECTS};
use bytemuck::Pod;
use std::{fmt::Write, mem::size_of};
use thiserror::Error;

/// Scalar and vector types that appear in mirrored buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslType {
    Uint,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl GlslType {
    pub fn name(&self) -> &'static str {
        match *self {
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat4 => "mat4",
        }
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        match *self {
            Self::Uint | Self::Float => 4,
            Self::Vec2 => 8,
            Self::Vec3 => 12,
            Self::Vec4 => 16,
            Self::Mat4 => 64,
        }
    }

    /// std140 base alignment in bytes
    pub fn std140_alignment(&self) -> usize {
        match *self {
            Self::Uint | Self::Float => 4,
            Self::Vec2 => 8,
            Self::Vec3 | Self::Vec4 | Self::Mat4 => 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuField {
    pub name: &'static str,
    pub ty: GlslType,
}

impl GpuField {
    pub const fn new(name: &'static str, ty: GlslType) -> Self {
        Self { name, ty }
    }
}

/// A `#[repr(C)]` struct uploaded to the gpu with a matching glsl declaration.
pub trait GpuRecord: Pod {
    /// Name of the glsl struct or uniform block
    const GLSL_NAME: &'static str;
    /// Fields in declaration order
    const FIELDS: &'static [GpuField];
    /// Byte offset of each entry of [`Self::FIELDS`] in the host struct
    fn host_offsets() -> Vec<usize>;
}

/// std140 offsets of `fields` and the total (16 byte rounded) struct size
pub fn std140_layout(fields: &[GpuField]) -> (Vec<usize>, usize) {
    let mut offsets = Vec::with_capacity(fields.len());
    let mut cursor = 0;
    for field in fields {
        cursor = round_up(cursor, field.ty.std140_alignment());
        offsets.push(cursor);
        cursor += field.ty.size();
    }
    // structs and arrays of structs are rounded up to vec4 alignment
    (offsets, round_up(cursor, 16))
}

#[inline]
fn round_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) / alignment * alignment
}

/// Glsl member lines (one per field, indented by four spaces)
pub fn glsl_members<T: GpuRecord>() -> String {
    let mut members = String::new();
    for field in T::FIELDS {
        // writing to a String can't fail
        let _ = writeln!(members, "    {} {};", field.ty.name(), field.name);
    }
    members
}

/// `struct Name { ... };` declaration for records that are stored in arrays
pub fn glsl_struct_declaration<T: GpuRecord>() -> String {
    format!("struct {} {{\n{}}};\n", T::GLSL_NAME, glsl_members::<T>())
}

fn glsl_uniform_block(binding: u32, block_name: &str, members: &str, instance_name: &str) -> String {
    format!(
        "layout(std140, set = {}, binding = {}) uniform {} {{\n{}}} {};\n",
        bindings::DESCRIPTOR_SET,
        binding,
        block_name,
        members,
        instance_name
    )
}

/// Record structs and uniform block declarations of every buffer the fragment program reads.
pub fn glsl_buffer_declarations() -> String {
    let mut declarations = String::new();
    declarations.push_str(&glsl_struct_declaration::<ObjectRecord>());
    declarations.push('\n');
    declarations.push_str(&glsl_struct_declaration::<LightRecord>());
    declarations.push('\n');
    declarations.push_str(&glsl_uniform_block(
        bindings::RENDER_SETTINGS,
        RenderSettingsBuffer::GLSL_NAME,
        &glsl_members::<RenderSettingsBuffer>(),
        RenderSettingsBuffer::GLSL_INSTANCE_NAME,
    ));
    declarations.push('\n');
    declarations.push_str(&glsl_uniform_block(
        bindings::CAMERA,
        CameraUniformBuffer::GLSL_NAME,
        &glsl_members::<CameraUniformBuffer>(),
        CameraUniformBuffer::GLSL_INSTANCE_NAME,
    ));
    declarations.push('\n');
    declarations.push_str(&glsl_uniform_block(
        bindings::SCENE,
        RayMarchSceneBuffer::GLSL_BLOCK_NAME,
        &format!(
            "    {} {}[{}];\n",
            ObjectRecord::GLSL_NAME,
            RayMarchSceneBuffer::GLSL_ARRAY_NAME,
            RAYMARCH_MAX_OBJECTS
        ),
        RayMarchSceneBuffer::GLSL_INSTANCE_NAME,
    ));
    declarations.push('\n');
    declarations.push_str(&glsl_uniform_block(
        bindings::LIGHTS,
        RayMarchLightBuffer::GLSL_BLOCK_NAME,
        &format!(
            "    {} {}[{}];\n",
            LightRecord::GLSL_NAME,
            RayMarchLightBuffer::GLSL_ARRAY_NAME,
            RAYMARCH_MAX_LIGHTS
        ),
        RayMarchLightBuffer::GLSL_INSTANCE_NAME,
    ));
    declarations
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferLayoutMismatch {
    #[error("{record}.{field} is at host offset {host_offset} but std140 offset {device_offset}")]
    FieldOffset {
        record: &'static str,
        field: &'static str,
        host_offset: usize,
        device_offset: usize,
    },
    #[error("{record} has host size {host_size} but std140 size {device_size}")]
    Size {
        record: &'static str,
        host_size: usize,
        device_size: usize,
    },
    #[error("{record} field table has {table_len} entries but host struct reports {host_len}")]
    FieldCount {
        record: &'static str,
        table_len: usize,
        host_len: usize,
    },
}

/// Checks that `T`'s host layout equals the std140 layout of its field table.
pub fn verify_layout<T: GpuRecord>() -> Result<(), BufferLayoutMismatch> {
    let (device_offsets, device_size) = std140_layout(T::FIELDS);
    let host_offsets = T::host_offsets();
    if host_offsets.len() != device_offsets.len() {
        return Err(BufferLayoutMismatch::FieldCount {
            record: T::GLSL_NAME,
            table_len: device_offsets.len(),
            host_len: host_offsets.len(),
        });
    }
    for ((field, host_offset), device_offset) in
        T::FIELDS.iter().zip(host_offsets).zip(device_offsets)
    {
        if host_offset != device_offset {
            return Err(BufferLayoutMismatch::FieldOffset {
                record: T::GLSL_NAME,
                field: field.name,
                host_offset,
                device_offset,
            });
        }
    }
    if size_of::<T>() != device_size {
        return Err(BufferLayoutMismatch::Size {
            record: T::GLSL_NAME,
            host_size: size_of::<T>(),
            device_size,
        });
    }
    Ok(())
}

/// Checks that a host array buffer `B` holds exactly `count` std140 elements of `T`.
pub fn verify_array_layout<T: GpuRecord, B: Pod>(
    buffer_name: &'static str,
    count: usize,
) -> Result<(), BufferLayoutMismatch> {
    verify_layout::<T>()?;
    let (_, element_size) = std140_layout(T::FIELDS);
    let device_size = element_size * count;
    if size_of::<B>() != device_size {
        return Err(BufferLayoutMismatch::Size {
            record: buffer_name,
            host_size: size_of::<B>(),
            device_size,
        });
    }
    Ok(())
}

pub fn verify_buffer_layouts() -> Result<(), BufferLayoutMismatch> {
    verify_layout::<RenderSettingsBuffer>()?;
    verify_layout::<CameraUniformBuffer>()?;
    verify_array_layout::<ObjectRecord, RayMarchSceneBuffer>(
        RayMarchSceneBuffer::GLSL_BLOCK_NAME,
        RAYMARCH_MAX_OBJECTS,
    )?;
    verify_array_layout::<LightRecord, RayMarchLightBuffer>(
        RayMarchLightBuffer::GLSL_BLOCK_NAME,
        RAYMARCH_MAX_LIGHTS,
    )?;
    Ok(())
}

/// Panics if any host buffer disagrees with the glsl declarations. A mismatch is a programming
/// error that would otherwise render silently wrong geometry.
#[track_caller]
pub fn assert_buffer_layouts() {
    if let Err(e) = verify_buffer_layouts() {
        panic!("gpu buffer layout mismatch: {}", e);
    }
}
