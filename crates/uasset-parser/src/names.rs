//! Package name table and interned name references.
//!
//! Every name in a package body is stored as a pair of int32s - an index
//! into the package's name table and an instance number - rather than as
//! inline text. The table is built once from the package summary before
//! any object decoding starts and is append-only after that, so it can be
//! shared read-only across whatever decodes the package.

use std::fmt;
use std::io::{Read, Seek};

use crate::reader::AssetReader;
use crate::{Error, Result};

/// Ordered, append-only table of interned name strings.
#[derive(Debug, Default, Clone)]
pub struct NameMap {
    entries: Vec<String>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern the next name. Indices are assigned in insertion order.
    pub fn push(&mut self, name: impl Into<String>) {
        self.entries.push(name.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NameMap {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A resolved name reference.
///
/// `number` disambiguates repeated base names: 0 means the bare name,
/// `n > 0` displays as `text_{n-1}` (`Foo`, `Foo_0`, `Foo_1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub text: String,
    pub index: i32,
    pub number: i32,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number == 0 {
            f.write_str(&self.text)
        } else {
            write!(f, "{}_{}", self.text, self.number - 1)
        }
    }
}

impl<R: Read + Seek> AssetReader<R> {
    /// Read a name reference and resolve it against `names`.
    ///
    /// An out-of-range table index is a hard failure: it almost always
    /// means the cursor desynchronized somewhere upstream, and decoding
    /// further would only compound the damage.
    pub fn read_name(&mut self, names: &NameMap) -> Result<Name> {
        let position = self.position();
        let index = self.read_i32()?;
        let number = self.read_i32()?;

        let text = usize::try_from(index)
            .ok()
            .and_then(|i| names.get(i))
            .ok_or(Error::NameIndexOutOfRange {
                index,
                len: names.len(),
                position,
            })?;

        Ok(Name {
            text: text.to_owned(),
            index,
            number,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reader::AssetReader;
    use crate::versions::PackageVersion;
    use crate::writer::AssetWriter;

    fn name_bytes(index: i32, number: i32) -> Vec<u8> {
        let mut w = AssetWriter::new_in_memory();
        w.write_i32(index).unwrap();
        w.write_i32(number).unwrap();
        w.into_inner()
    }

    #[test]
    fn resolves_in_range_indices() {
        let names: NameMap = ["None", "Mesh", "Material"].into_iter().collect();
        let mut r = AssetReader::from_bytes(name_bytes(1, 0), PackageVersion::default());
        let name = r.read_name(&names).unwrap();
        assert_eq!(name.text, "Mesh");
        assert_eq!(name.index, 1);
        assert_eq!(name.number, 0);
    }

    #[test]
    fn out_of_range_index_carries_bounds() {
        let names: NameMap = ["None"].into_iter().collect();
        for bad in [-1, 1, 42] {
            let mut r =
                AssetReader::from_bytes(name_bytes(bad, 0), PackageVersion::default());
            let err = r.read_name(&names).unwrap_err();
            match err {
                Error::NameIndexOutOfRange {
                    index,
                    len,
                    position,
                } => {
                    assert_eq!(index, bad);
                    assert_eq!(len, 1);
                    assert_eq!(position, 0);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn instance_number_formats_with_suffix() {
        let plain = Name {
            text: "Foo".into(),
            index: 0,
            number: 0,
        };
        let second = Name {
            text: "Foo".into(),
            index: 0,
            number: 2,
        };
        assert_eq!(plain.to_string(), "Foo");
        assert_eq!(second.to_string(), "Foo_1");
    }
}
