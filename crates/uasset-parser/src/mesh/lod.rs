//! One level-of-detail block of a cooked static mesh.

use std::io::{Read, Seek};

use tracing::debug;

use crate::mesh::index_buffer::RawIndexBuffer;
use crate::mesh::sampler::WeightedRandomSampler;
use crate::mesh::section::MeshSection;
use crate::mesh::vertex::{MeshVertexBuffer, PositionVertexBuffer};
use crate::reader::AssetReader;
use crate::strip_flags::StripFlags;
use crate::versions::EngineVersion;
use crate::{Error, Result};

/// Class strip bit: adjacency index buffer was cooked out.
pub const CDSF_ADJACENCY_DATA: u8 = 0x01;
/// Class strip bit: data below the minimum LOD was cooked out.
pub const CDSF_MIN_LOD_DATA: u8 = 0x02;
/// Class strip bit: reversed index buffers were cooked out.
pub const CDSF_REVERSED_INDEX_BUFFER: u8 = 0x04;
/// Class strip bit: ray tracing resources were cooked out.
pub const CDSF_RAYTRACING_RESOURCES: u8 = 0x08;

/// Render resources for one static mesh LOD.
///
/// The decode follows the 4.23+ cooked layout: strip flags, sections and
/// max deviation are unconditional; the buffer body only exists when the
/// LOD is neither server-stripped nor cooked out, and only the inlined
/// form is supported (streamed LODs live outside the package payload).
#[derive(Debug, Clone, Default)]
pub struct LodResources {
    pub strip_flags: StripFlags,
    pub sections: Vec<MeshSection>,
    pub max_deviation: f32,
    pub is_lod_cooked_out: bool,
    pub is_inlined: bool,
    pub position_buffer: Option<PositionVertexBuffer>,
    pub vertex_buffer: Option<MeshVertexBuffer>,
    pub index_buffer: Option<RawIndexBuffer>,
    pub reversed_index_buffer: Option<RawIndexBuffer>,
    pub wireframe_index_buffer: Option<RawIndexBuffer>,
    pub adjacency_index_buffer: Option<RawIndexBuffer>,
    /// Raw 4.25+ ray tracing payload, kept packed.
    pub ray_tracing_data: Vec<u8>,
    pub section_samplers: Vec<WeightedRandomSampler>,
    pub mesh_sampler: Option<WeightedRandomSampler>,
    pub serialized_buffers_size: u32,
    pub depth_only_ib_size: u32,
    pub reversed_ibs_size: u32,
}

impl LodResources {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        let strip_flags = StripFlags::parse(reader)?;
        let sections = reader.read_array(MeshSection::parse)?;
        let max_deviation = reader.read_f32()?;

        let mut lod = Self {
            strip_flags,
            sections,
            max_deviation,
            ..Self::default()
        };

        if reader.version.engine < EngineVersion::ue4(23) {
            if !lod.strip_flags.is_data_stripped_for_server()
                && !lod.strip_flags.is_class_data_stripped(CDSF_MIN_LOD_DATA)
            {
                return Err(Error::UnsupportedLayout(
                    "static mesh LOD buffers before UE 4.23",
                ));
            }
            return Ok(lod);
        }

        lod.is_lod_cooked_out = reader.read_bool()?;
        lod.is_inlined = reader.read_bool()?;
        debug!(
            sections = lod.sections.len(),
            cooked_out = lod.is_lod_cooked_out,
            inlined = lod.is_inlined,
            "decoding LOD resources"
        );

        if !lod.strip_flags.is_data_stripped_for_server() && !lod.is_lod_cooked_out {
            if lod.is_inlined {
                lod.parse_buffers(reader)?;
            } else {
                return Err(Error::UnsupportedLayout("streamed (non-inlined) LOD buffers"));
            }
        }

        lod.serialized_buffers_size = reader.read_u32()?;
        lod.depth_only_ib_size = reader.read_u32()?;
        lod.reversed_ibs_size = reader.read_u32()?;
        Ok(lod)
    }

    /// Inlined buffer body. Section order is fixed by the cooker; every
    /// optional block is gated by the outer strip flags, never guessed
    /// from the bytes.
    fn parse_buffers<R: Read + Seek>(&mut self, reader: &mut AssetReader<R>) -> Result<()> {
        // The body repeats a strip-flag pair; gating stays with the
        // outer flags.
        let _inline_strip_flags = StripFlags::parse(reader)?;

        self.position_buffer = Some(PositionVertexBuffer::parse(reader)?);
        self.vertex_buffer = Some(MeshVertexBuffer::parse(reader)?);
        self.index_buffer = Some(RawIndexBuffer::parse(reader)?);

        if !self.strip_flags.is_class_data_stripped(CDSF_REVERSED_INDEX_BUFFER) {
            self.reversed_index_buffer = Some(RawIndexBuffer::parse(reader)?);
        }
        if !self.strip_flags.is_editor_data_stripped() {
            self.wireframe_index_buffer = Some(RawIndexBuffer::parse(reader)?);
        }
        if !self.strip_flags.is_class_data_stripped(CDSF_ADJACENCY_DATA) {
            self.adjacency_index_buffer = Some(RawIndexBuffer::parse(reader)?);
        }
        if reader.version.engine >= EngineVersion::ue4(25)
            && !self.strip_flags.is_class_data_stripped(CDSF_RAYTRACING_RESOURCES)
        {
            self.ray_tracing_data = reader.read_bulk_array(|r| r.read_u8())?;
        }

        for _ in 0..self.sections.len() {
            self.section_samplers
                .push(WeightedRandomSampler::parse(reader)?);
        }
        self.mesh_sampler = Some(WeightedRandomSampler::parse(reader)?);
        Ok(())
    }
}
