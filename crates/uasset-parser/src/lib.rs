//! Decoder for versioned Unreal Engine package asset binary formats.
//!
//! Unreal packages carry no self-describing schema: the on-disk shape of
//! every structure is decided at decode time from an engine serialization
//! version, an engine release tag, and per-instance strip flags. This crate
//! provides the pieces that discipline is built from:
//!
//! - [`reader::AssetReader`]: a bounded, version-tagged cursor over a byte
//!   source with every primitive encoding the format uses (little-endian
//!   scalars, wide and narrow booleans, 7-bit variable-length integers,
//!   two string encodings), plus segmented addressing across a primary
//!   and a bulk-data source.
//! - [`writer::AssetWriter`]: the mirror write path, one writer per reader
//!   primitive.
//! - [`names::NameMap`] / [`objects::PackageContext`]: resolution of the
//!   small integers embedded in the stream into interned names and into
//!   cross-references to other decoded objects.
//! - [`mesh`]: the static mesh LOD/index-buffer family, the canonical
//!   instance of the version-conditional layout protocol.
//!
//! A reader instance is not thread-safe: the cursor is shared mutable
//! state and every read advances it. Parallelism happens across packages,
//! one reader and one name table per package.

mod array;
mod error;
pub mod mesh;
pub mod names;
pub mod objects;
pub mod reader;
pub mod strip_flags;
pub mod utils;
pub mod versions;
pub mod writer;

pub use error::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
