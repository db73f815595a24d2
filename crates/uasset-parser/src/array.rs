//! Length-prefixed homogeneous sequences.
//!
//! Element decoding is parameterized over a closure so the same machinery
//! serves scalars and nested structures alike. The bulk variant carries a
//! declared per-element byte size and cross-checks it against the bytes
//! actually consumed - bulk arrays are where version-layout drift shows
//! up first, so a mismatch is fatal rather than best-effort.

use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::{Error, Result};

impl<R: Read + Seek> AssetReader<R> {
    /// Read an int32 count, then `count` elements through `f` in order.
    pub fn read_array<T>(
        &mut self,
        f: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = self.read_i32()?;
        self.read_array_count(usize::try_from(count).unwrap_or(0), f)
    }

    /// Read `count` elements through `f` with an externally supplied
    /// count.
    pub fn read_array_count<T>(
        &mut self,
        count: usize,
        mut f: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(count.min(0x1_0000));
        for _ in 0..count {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Read a self-validating bulk array: int32 declared per-element
    /// size, then an array as in [`Self::read_array`]. Total bytes
    /// consumed must equal `4 + count * declared_size`.
    pub fn read_bulk_array<T>(
        &mut self,
        f: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let declared = self.read_i32()?;
        let start = self.position();
        let items = self.read_array(f)?;

        let consumed = self.position() - start;
        // A negative declared size can never match; checked math keeps a
        // corrupt prefix from overflowing instead of erroring.
        let expected = u64::try_from(declared)
            .ok()
            .and_then(|d| (items.len() as u64).checked_mul(d))
            .and_then(|n| n.checked_add(4));
        if expected != Some(consumed) {
            // count field is the 4 bytes up front
            let serialized = if items.is_empty() {
                consumed - 4
            } else {
                (consumed - 4) / items.len() as u64
            };
            return Err(Error::BulkSizeMismatch {
                declared,
                serialized,
            });
        }
        Ok(items)
    }
}
