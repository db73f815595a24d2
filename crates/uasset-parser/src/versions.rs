//! Version and game tags that select on-disk layouts.
//!
//! Two independent axes condition every structure's shape: the
//! serialization version ([`ObjectVersion`], bumped whenever a struct's
//! layout changed) and the engine release ([`EngineVersion`], used where
//! cooked data changed without a version bump). A third axis,
//! [`GameVariant`], gates per-title quirks within an otherwise unchanged
//! engine branch. All three are supplied by the caller when a reader is
//! constructed; nothing here is auto-detected.

/// Serialization version recorded in a package summary.
///
/// Ordered so decoders can range-check against named thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectVersion(pub i32);

impl ObjectVersion {
    /// Static mesh index buffers may be serialized with 32-bit elements.
    pub const SUPPORT_32BIT_STATIC_MESH_INDICES: Self = Self(368);

    /// Most recent serialization version this crate knows about.
    pub const LATEST: Self = Self(522);
}

/// Engine release an asset was cooked with, e.g. 4.25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EngineVersion {
    pub major: u16,
    pub minor: u16,
}

impl EngineVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// A UE4 release, `ue4(25)` = 4.25.
    pub const fn ue4(minor: u16) -> Self {
        Self::new(4, minor)
    }

    /// A UE5 release, `ue5(1)` = 5.1.
    pub const fn ue5(minor: u16) -> Self {
        Self::new(5, minor)
    }
}

impl std::fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Per-title patch variant, orthogonal to the engine release.
///
/// `BASE` is the stock engine layout. Titles that patched extra fields
/// into cooked structures get an ordered value, checked after (never
/// instead of) the engine-version branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameVariant(pub u16);

impl GameVariant {
    /// Stock engine serialization.
    pub const BASE: Self = Self(0);

    /// Titles that append a per-section user data word to mesh sections.
    pub const WITH_SECTION_USER_DATA: Self = Self(1);
}

/// The full set of tags a reader is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageVersion {
    pub object_version: ObjectVersion,
    pub engine: EngineVersion,
    pub variant: GameVariant,
}

impl PackageVersion {
    pub const fn new(
        object_version: ObjectVersion,
        engine: EngineVersion,
        variant: GameVariant,
    ) -> Self {
        Self {
            object_version,
            engine,
            variant,
        }
    }

    /// Tags for a stock UE4 release at the latest serialization version.
    pub const fn ue4(minor: u16) -> Self {
        Self::new(
            ObjectVersion::LATEST,
            EngineVersion::ue4(minor),
            GameVariant::BASE,
        )
    }
}

impl Default for PackageVersion {
    fn default() -> Self {
        Self::ue4(27)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_versions_order_across_majors() {
        assert!(EngineVersion::ue4(27) < EngineVersion::ue5(0));
        assert!(EngineVersion::ue4(23) <= EngineVersion::ue4(23));
        assert!(EngineVersion::ue4(25) > EngineVersion::ue4(9));
    }

    #[test]
    fn object_versions_are_range_checkable() {
        let old = ObjectVersion(100);
        assert!(old < ObjectVersion::SUPPORT_32BIT_STATIC_MESH_INDICES);
        assert!(ObjectVersion::LATEST >= ObjectVersion::SUPPORT_32BIT_STATIC_MESH_INDICES);
    }

    #[test]
    fn variant_is_independent_of_engine() {
        let tags = PackageVersion::new(
            ObjectVersion::LATEST,
            EngineVersion::ue4(23),
            GameVariant::WITH_SECTION_USER_DATA,
        );
        assert!(tags.variant >= GameVariant::WITH_SECTION_USER_DATA);
        assert_eq!(tags.engine, EngineVersion::ue4(23));
    }
}
