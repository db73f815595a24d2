//! Mesh vertex buffers.
//!
//! The position buffer is decoded to full vectors; the attribute buffer
//! keeps its tangent and texcoord payloads as raw bytes, since unpacking
//! the packed vertex formats is a concern of whoever consumes the mesh.

use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::strip_flags::StripFlags;
use crate::Result;

/// Vertex positions, one `[x, y, z]` triple per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionVertexBuffer {
    pub stride: u32,
    pub num_vertices: u32,
    pub positions: Vec<[f32; 3]>,
}

impl PositionVertexBuffer {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        let stride = reader.read_u32()?;
        let num_vertices = reader.read_u32()?;
        let positions = reader.read_bulk_array(|r| {
            Ok([r.read_f32()?, r.read_f32()?, r.read_f32()?])
        })?;
        Ok(Self {
            stride,
            num_vertices,
            positions,
        })
    }
}

/// Tangent basis and texture coordinates for each vertex, kept packed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshVertexBuffer {
    pub strip_flags: StripFlags,
    pub num_tex_coords: i32,
    pub num_vertices: i32,
    pub use_full_precision_uvs: bool,
    pub use_high_precision_tangent_basis: bool,
    pub tangent_data: Vec<u8>,
    pub texcoord_data: Vec<u8>,
}

impl MeshVertexBuffer {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        let strip_flags = StripFlags::parse(reader)?;
        let num_tex_coords = reader.read_i32()?;
        let num_vertices = reader.read_i32()?;
        let use_full_precision_uvs = reader.read_bool()?;
        let use_high_precision_tangent_basis = reader.read_bool()?;

        let (mut tangent_data, mut texcoord_data) = (Vec::new(), Vec::new());
        if !strip_flags.is_data_stripped_for_server() {
            tangent_data = reader.read_bulk_array(|r| r.read_u8())?;
            texcoord_data = reader.read_bulk_array(|r| r.read_u8())?;
        }

        Ok(Self {
            strip_flags,
            num_tex_coords,
            num_vertices,
            use_full_precision_uvs,
            use_high_precision_tangent_basis,
            tangent_data,
            texcoord_data,
        })
    }
}
