//! Per-instance strip flags.
//!
//! Cooked structures open with two flag bytes recording which optional
//! sections were omitted at cook time: engine-defined bits in the global
//! byte, structure-defined bits in the class byte. Decoders read the
//! flags once, consult them while gating optional sections, and drop
//! them.

use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::Result;

const EDITOR_DATA_STRIPPED: u8 = 0x01;
const SERVER_DATA_STRIPPED: u8 = 0x02;

/// Strip flags read ahead of a structure's optional sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripFlags {
    pub global: u8,
    pub class: u8,
}

impl StripFlags {
    pub fn parse<R: Read + Seek>(reader: &mut AssetReader<R>) -> Result<Self> {
        Ok(Self {
            global: reader.read_u8()?,
            class: reader.read_u8()?,
        })
    }

    /// Editor-only data was removed when cooking for a runtime target.
    pub fn is_editor_data_stripped(self) -> bool {
        self.global & EDITOR_DATA_STRIPPED != 0
    }

    /// Data not needed by dedicated servers was removed.
    pub fn is_data_stripped_for_server(self) -> bool {
        self.global & SERVER_DATA_STRIPPED != 0
    }

    /// Structure-specific optional block named by `mask` was removed.
    pub fn is_class_data_stripped(self, mask: u8) -> bool {
        self.class & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::versions::PackageVersion;

    #[test]
    fn bits_are_independently_testable() {
        let flags = StripFlags {
            global: 0x02,
            class: 0x05,
        };
        assert!(!flags.is_editor_data_stripped());
        assert!(flags.is_data_stripped_for_server());
        assert!(flags.is_class_data_stripped(0x01));
        assert!(!flags.is_class_data_stripped(0x02));
        assert!(flags.is_class_data_stripped(0x04));
    }

    #[test]
    fn parse_consumes_exactly_two_bytes() {
        let mut r = crate::reader::AssetReader::from_bytes(
            vec![0x01, 0x08, 0xAA],
            PackageVersion::default(),
        );
        let flags = StripFlags::parse(&mut r).unwrap();
        assert_eq!(flags.global, 0x01);
        assert_eq!(flags.class, 0x08);
        assert_eq!(r.position(), 2);
    }
}
