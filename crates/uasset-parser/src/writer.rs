//! Mirror write path for every reader primitive.
//!
//! Writers append only: each primitive writes its exact read encoding and
//! bumps the recorded size. No seek-then-overwrite behavior is promised
//! beyond what the underlying sink provides.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::names::Name;
use crate::objects::PackageIndex;
use crate::{Error, Result};

/// Appending encoder for package primitives.
#[derive(Debug)]
pub struct AssetWriter<W> {
    sink: W,
    size: u64,
}

impl AssetWriter<Vec<u8>> {
    /// Writer backed by an in-memory buffer.
    pub fn new_in_memory() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> AssetWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, size: 0 }
    }

    /// Total bytes written so far.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Consume the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes)?;
        self.size += bytes.len() as u64;
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.sink.write_u8(v)?;
        self.size += 1;
        Ok(())
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.sink.write_i8(v)?;
        self.size += 1;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.sink.write_u16::<LittleEndian>(v)?;
        self.size += 2;
        Ok(())
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.sink.write_i16::<LittleEndian>(v)?;
        self.size += 2;
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.sink.write_u32::<LittleEndian>(v)?;
        self.size += 4;
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.sink.write_i32::<LittleEndian>(v)?;
        self.size += 4;
        Ok(())
    }

    pub fn write_u64(&mut self, v: u64) -> Result<()> {
        self.sink.write_u64::<LittleEndian>(v)?;
        self.size += 8;
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.sink.write_i64::<LittleEndian>(v)?;
        self.size += 8;
        Ok(())
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        self.sink.write_f32::<LittleEndian>(v)?;
        self.size += 4;
        Ok(())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        self.sink.write_f64::<LittleEndian>(v)?;
        self.size += 8;
        Ok(())
    }

    /// Wide boolean: int32 0 or 1.
    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_i32(i32::from(v))
    }

    /// Narrow boolean: one byte, 0 or 1.
    pub fn write_flag(&mut self, v: bool) -> Result<()> {
        self.write_u8(u8::from(v))
    }

    /// 7-bit variable-length unsigned integer, least-significant group
    /// first, top bit as continuation.
    pub fn write_varint(&mut self, mut v: u64) -> Result<()> {
        loop {
            let mut byte = (v & 0x7F) as u8;
            v >>= 7;
            if v != 0 {
                byte |= 0x80;
            }
            self.write_u8(byte)?;
            if v == 0 {
                return Ok(());
            }
        }
    }

    /// Short identifier string: one length byte plus raw UTF-8.
    pub fn write_short_string(&mut self, s: &str) -> Result<()> {
        let length = s.len();
        if length > u8::MAX as usize {
            return Err(Error::ShortStringTooLong { length });
        }
        self.write_u8(length as u8)?;
        self.write_bytes(s.as_bytes())
    }

    /// General string (`FString`).
    ///
    /// ASCII content is written narrow (UTF-8 bytes plus a null
    /// terminator, positive length); anything else is written wide
    /// (UTF-16 code units plus a null terminator, negated length). The
    /// empty string is a bare zero length.
    pub fn write_fstring(&mut self, s: &str) -> Result<()> {
        if s.is_empty() {
            return self.write_i32(0);
        }
        if s.is_ascii() {
            self.write_i32(s.len() as i32 + 1)?;
            self.write_bytes(s.as_bytes())?;
            self.write_u8(0)
        } else {
            let units: Vec<u16> = s.encode_utf16().collect();
            self.write_i32(-(units.len() as i32 + 1))?;
            for unit in units {
                self.write_u16(unit)?;
            }
            self.write_u16(0)
        }
    }

    /// Array: int32 count, then each element through `f` in order.
    pub fn write_array<T>(
        &mut self,
        items: &[T],
        mut f: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.write_i32(items.len() as i32)?;
        for item in items {
            f(self, item)?;
        }
        Ok(())
    }

    /// Bulk array: int32 declared per-element size, then the array. The
    /// caller's `f` must serialize exactly `element_size` bytes per item
    /// for the result to decode.
    pub fn write_bulk_array<T>(
        &mut self,
        element_size: i32,
        items: &[T],
        f: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.write_i32(element_size)?;
        self.write_array(items, f)
    }

    /// Name reference: table index plus instance number.
    pub fn write_name(&mut self, name: &Name) -> Result<()> {
        self.write_i32(name.index)?;
        self.write_i32(name.number)
    }

    /// Object reference: the signed package index.
    pub fn write_package_index(&mut self, index: PackageIndex) -> Result<()> {
        self.write_i32(index.0)
    }
}
