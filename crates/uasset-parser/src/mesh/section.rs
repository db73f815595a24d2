//! Per-material section of a mesh LOD.

use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::versions::{EngineVersion, GameVariant};
use crate::Result;

/// Range of an LOD's index buffer rendered with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSection {
    pub material_index: i32,
    pub first_index: u32,
    pub num_triangles: u32,
    pub min_vertex_index: u32,
    pub max_vertex_index: u32,
    pub enable_collision: bool,
    pub cast_shadow: bool,
    /// 4.25+ only.
    pub force_opaque: bool,
    /// 4.25+ only.
    pub visible_in_ray_tracing: bool,
    /// Extra word some titles patch in; `None` on the stock layout.
    pub user_data: Option<u32>,
}

impl MeshSection {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        let material_index = reader.read_i32()?;
        let first_index = reader.read_u32()?;
        let num_triangles = reader.read_u32()?;
        let min_vertex_index = reader.read_u32()?;
        let max_vertex_index = reader.read_u32()?;
        let enable_collision = reader.read_bool()?;
        let cast_shadow = reader.read_bool()?;

        let (mut force_opaque, mut visible_in_ray_tracing) = (false, true);
        if reader.version.engine >= EngineVersion::ue4(25) {
            force_opaque = reader.read_bool()?;
            visible_in_ray_tracing = reader.read_bool()?;
        }

        // Title-patched extension: strictly additive on top of whichever
        // engine branch was taken above.
        let user_data = if reader.version.variant >= GameVariant::WITH_SECTION_USER_DATA {
            Some(reader.read_u32()?)
        } else {
            None
        };

        Ok(Self {
            material_index,
            first_index,
            num_triangles,
            min_vertex_index,
            max_vertex_index,
            enable_collision,
            cast_shadow,
            force_opaque,
            visible_in_ray_tracing,
            user_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::AssetReader;
    use crate::versions::{ObjectVersion, PackageVersion};
    use crate::writer::AssetWriter;

    fn encode(ue4_25: bool, user_data: Option<u32>) -> Vec<u8> {
        let mut w = AssetWriter::new_in_memory();
        w.write_i32(2).unwrap();
        w.write_u32(0).unwrap();
        w.write_u32(12).unwrap();
        w.write_u32(0).unwrap();
        w.write_u32(35).unwrap();
        w.write_bool(true).unwrap();
        w.write_bool(false).unwrap();
        if ue4_25 {
            w.write_bool(false).unwrap();
            w.write_bool(true).unwrap();
        }
        if let Some(v) = user_data {
            w.write_u32(v).unwrap();
        }
        w.into_inner()
    }

    #[test]
    fn stock_ue4_23_layout() {
        let mut r = AssetReader::from_bytes(encode(false, None), PackageVersion::ue4(23));
        let section = MeshSection::parse(&mut r).unwrap();
        assert_eq!(section.material_index, 2);
        assert_eq!(section.num_triangles, 12);
        assert!(section.enable_collision);
        assert!(!section.force_opaque);
        assert_eq!(section.user_data, None);
    }

    #[test]
    fn ue4_25_adds_ray_tracing_fields() {
        let mut r = AssetReader::from_bytes(encode(true, None), PackageVersion::ue4(25));
        let section = MeshSection::parse(&mut r).unwrap();
        assert!(section.visible_in_ray_tracing);
        assert_eq!(r.position(), r.size());
    }

    #[test]
    fn variant_axis_is_additive_within_engine_branch() {
        let tags = PackageVersion::new(
            ObjectVersion::LATEST,
            EngineVersion::ue4(25),
            GameVariant::WITH_SECTION_USER_DATA,
        );
        let mut r = AssetReader::from_bytes(encode(true, Some(0xDEAD)), tags);
        let section = MeshSection::parse(&mut r).unwrap();
        assert_eq!(section.user_data, Some(0xDEAD));
        assert_eq!(r.position(), r.size());
    }
}
