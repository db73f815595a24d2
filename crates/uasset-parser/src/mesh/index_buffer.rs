//! Static mesh index buffer.

use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::versions::{EngineVersion, ObjectVersion};
use crate::Result;

/// Index buffer holding either 16-bit or 32-bit indices.
///
/// On disk the modern layout is a width flag followed by a raw byte bulk
/// array; the bytes are reinterpreted at the selected width after the
/// fact. Exactly one of the two vectors is populated (both are empty for
/// an empty buffer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIndexBuffer {
    pub indices16: Vec<u16>,
    pub indices32: Vec<u32>,
}

impl RawIndexBuffer {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        if reader.version.object_version < ObjectVersion::SUPPORT_32BIT_STATIC_MESH_INDICES {
            let indices16 = reader.read_bulk_array(|r| r.read_u16())?;
            return Ok(Self {
                indices16,
                indices32: Vec::new(),
            });
        }

        let is_32bit = reader.read_bool()?;
        let data = reader.read_bulk_array(|r| r.read_u8())?;
        if reader.version.engine >= EngineVersion::ue4(25) {
            // index buffer access flag, unused by the offline decode
            reader.read_bool()?;
        }

        if data.is_empty() {
            return Ok(Self::default());
        }

        // Reinterpret through a view over exactly these bytes; the outer
        // cursor must not be involved.
        let count = data.len();
        let mut view = reader.sub_reader(data);
        if is_32bit {
            let indices32 = view.read_array_count(count / 4, |r| r.read_u32())?;
            Ok(Self {
                indices16: Vec::new(),
                indices32,
            })
        } else {
            let indices16 = view.read_array_count(count / 2, |r| r.read_u16())?;
            Ok(Self {
                indices16,
                indices32: Vec::new(),
            })
        }
    }

    /// Number of indices at whichever width is populated.
    pub fn len(&self) -> usize {
        self.indices16.len() + self.indices32.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices16.is_empty() && self.indices32.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::AssetReader;
    use crate::versions::PackageVersion;
    use crate::writer::AssetWriter;

    fn encode(is_32bit: bool, payload: &[u8], trailing_flag: bool) -> Vec<u8> {
        let mut w = AssetWriter::new_in_memory();
        w.write_bool(is_32bit).unwrap();
        w.write_bulk_array(1, payload, |w, b| w.write_u8(*b)).unwrap();
        if trailing_flag {
            w.write_bool(false).unwrap();
        }
        w.into_inner()
    }

    #[test]
    fn legacy_version_reads_plain_u16_bulk_array() {
        let mut w = AssetWriter::new_in_memory();
        w.write_bulk_array(2, &[7u16, 8, 9], |w, v| w.write_u16(*v))
            .unwrap();

        let mut tags = PackageVersion::ue4(9);
        tags.object_version = crate::versions::ObjectVersion(100);
        let mut r = AssetReader::from_bytes(w.into_inner(), tags);
        let buffer = RawIndexBuffer::parse(&mut r).unwrap();
        assert_eq!(buffer.indices16, vec![7, 8, 9]);
        assert!(buffer.indices32.is_empty());
    }

    #[test]
    fn modern_16bit_roles() {
        let payload: Vec<u8> = [5u16, 6, 7]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let mut r = AssetReader::from_bytes(
            encode(false, &payload, false),
            PackageVersion::ue4(23),
        );
        let buffer = RawIndexBuffer::parse(&mut r).unwrap();
        assert_eq!(buffer.indices16, vec![5, 6, 7]);
        assert!(buffer.indices32.is_empty());
    }

    #[test]
    fn modern_32bit_roles_invert() {
        let payload: Vec<u8> = [70_000u32, 80_000]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let mut r = AssetReader::from_bytes(
            encode(true, &payload, false),
            PackageVersion::ue4(23),
        );
        let buffer = RawIndexBuffer::parse(&mut r).unwrap();
        assert!(buffer.indices16.is_empty());
        assert_eq!(buffer.indices32, vec![70_000, 80_000]);
    }

    #[test]
    fn ue4_25_reads_extra_flag() {
        let payload = 3u16.to_le_bytes().to_vec();
        let bytes = encode(false, &payload, true);
        let size = bytes.len() as u64;
        let mut r = AssetReader::from_bytes(bytes, PackageVersion::ue4(25));
        let buffer = RawIndexBuffer::parse(&mut r).unwrap();
        assert_eq!(buffer.indices16, vec![3]);
        assert_eq!(r.position(), size);
    }

    #[test]
    fn empty_payload_leaves_both_widths_empty() {
        let mut r = AssetReader::from_bytes(
            encode(true, &[], false),
            PackageVersion::ue4(23),
        );
        let buffer = RawIndexBuffer::parse(&mut r).unwrap();
        assert!(buffer.is_empty());
    }
}
