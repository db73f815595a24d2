//! Cross-references between decoded objects.
//!
//! Objects point at each other through signed package indices: zero is
//! null, negative indexes the import table (objects defined in another
//! package), positive indexes this package's export table. Materializing
//! the referenced object is the surrounding package context's concern -
//! decoded objects live in an arena owned by the context and references
//! stay plain indices, so object graphs with cycles need no back-pointer
//! bookkeeping here.

use std::fmt;
use std::io::{Read, Seek};

use tracing::warn;

use crate::reader::AssetReader;
use crate::Result;

/// Signed index into a package's import/export tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageIndex(pub i32);

impl PackageIndex {
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn is_import(self) -> bool {
        self.0 < 0
    }

    pub fn is_export(self) -> bool {
        self.0 > 0
    }

    /// Zero-based import table position, if this is an import reference.
    pub fn import_index(self) -> Option<usize> {
        self.is_import().then(|| (-(self.0 as i64) - 1) as usize)
    }

    /// Zero-based export table position, if this is an export reference.
    pub fn export_index(self) -> Option<usize> {
        self.is_export().then(|| (self.0 as i64 - 1) as usize)
    }
}

impl fmt::Display for PackageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else if self.is_import() {
            write!(f, "import {}", self.import_index().unwrap_or_default())
        } else {
            write!(f, "export {}", self.export_index().unwrap_or_default())
        }
    }
}

/// The package/session context a reader resolves object references
/// against.
///
/// Owns the import/export tables and the arena of already-decoded
/// objects; `find_object` is expected to materialize lazily and memoize
/// per index. Implementations live with the package loader, not in this
/// crate.
pub trait PackageContext {
    /// Handle type handed back for a resolved object.
    type Object;

    /// Materialize the object behind `index`, or `None` if the target is
    /// unknown or not loaded.
    fn find_object(&self, index: PackageIndex) -> Option<Self::Object>;
}

impl<R: Read + Seek> AssetReader<R> {
    /// Read a bare package index without resolving it.
    pub fn read_package_index(&mut self) -> Result<PackageIndex> {
        Ok(PackageIndex(self.read_i32()?))
    }

    /// Read an object reference and resolve it through `ctx`.
    ///
    /// Null resolves to `None` without consulting the context. A non-null
    /// index the context cannot materialize also yields `None`, with a
    /// warning - missing dependencies are expected in partial-load
    /// scenarios and must not abort the decode.
    pub fn read_object<C: PackageContext>(&mut self, ctx: &C) -> Result<Option<C::Object>> {
        let index = self.read_package_index()?;
        if index.is_null() {
            return Ok(None);
        }
        let object = ctx.find_object(index);
        if object.is_none() {
            warn!(index = index.0, "object reference not found");
        }
        Ok(object)
    }
}
