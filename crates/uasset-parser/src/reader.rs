//! Bounded, version-tagged cursor over a package byte source.
//!
//! [`AssetReader`] is the single shared cursor every structure decoder
//! pulls from. It enforces the declared stream size (reads past the end
//! are decode failures, never short reads), carries the version tags
//! layout branches consult, and supports rebinding to an auxiliary
//! bulk-data source while keeping offsets addressable in one virtual
//! space ([`AssetReader::change_stream`]).
//!
//! A reader is not thread-safe: every read advances the cursor. Decode
//! one stream per reader, and run independent packages on independent
//! readers.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::versions::PackageVersion;
use crate::{Error, Result};

/// Cursor over a package byte source.
#[derive(Debug)]
pub struct AssetReader<R> {
    src: R,
    pos: u64,
    size: u64,
    fake_size: u64,
    /// Tags selecting version-conditional layouts.
    pub version: PackageVersion,
}

impl AssetReader<Cursor<Vec<u8>>> {
    /// Reader over an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>, version: PackageVersion) -> Self {
        let size = data.len() as u64;
        Self::new(Cursor::new(data), size, version)
    }
}

impl AssetReader<BufReader<File>> {
    /// Reader over a file on disk.
    pub fn open<P: AsRef<Path>>(path: P, version: PackageVersion) -> Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self::new(BufReader::new(file), size, version))
    }
}

impl<R: Read + Seek> AssetReader<R> {
    /// Reader over an arbitrary source with a declared size.
    ///
    /// The source's cursor must be at the start of the region being read.
    pub fn new(src: R, size: u64, version: PackageVersion) -> Self {
        Self {
            src,
            pos: 0,
            size,
            fake_size: size,
            version,
        }
    }

    /// Current cursor position within the physical source.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Declared size of the physical source.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Size of the virtual space spanning all sources bound so far.
    pub fn fake_size(&self) -> u64 {
        self.fake_size
    }

    /// Cursor position within the virtual space.
    ///
    /// Equals [`Self::position`] until [`Self::change_stream`] is called;
    /// afterwards it continues from where the previous source ended, so
    /// offsets recorded in the primary stream address bulk bytes without
    /// the two files ever being concatenated.
    pub fn fake_position(&self) -> u64 {
        (self.fake_size - self.size) + self.pos
    }

    /// Move the cursor. The target must stay within `[0, size]`.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => i128::from(self.pos) + i128::from(delta),
            SeekFrom::End(delta) => i128::from(self.size) + i128::from(delta),
        };
        if target < 0 || target > i128::from(self.size) {
            return Err(Error::SeekOutOfRange {
                target: target as i64,
                size: self.size,
            });
        }
        let target = target as u64;
        self.src.seek(SeekFrom::Start(target))?;
        self.pos = target;
        Ok(target)
    }

    /// Rebind the cursor to a new physical source, extending the virtual
    /// space: the new source's first byte sits at virtual offset
    /// `old_size`. Used when an asset's bulk data continues in a second
    /// file. The cursor restarts at the new source's beginning.
    pub fn change_stream(&mut self, src: R, size: u64) {
        self.fake_size = self.size + size;
        self.size = size;
        self.src = src;
        self.pos = 0;
    }

    /// Fresh in-memory reader over exactly `data`, carrying this
    /// reader's version tags. Used to reinterpret an extracted byte range
    /// (e.g. a raw index payload) without touching the outer cursor.
    pub fn sub_reader(&self, data: Vec<u8>) -> AssetReader<Cursor<Vec<u8>>> {
        AssetReader::from_bytes(data, self.version)
    }

    fn guard(&self, requested: u64) -> Result<()> {
        if self.pos + requested > self.size {
            return Err(Error::ReadOverrun {
                position: self.pos,
                requested,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.guard(n as u64)?;
        let mut buf = vec![0u8; n];
        self.src.read_exact(&mut buf)?;
        self.pos += n as u64;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.guard(1)?;
        let v = self.src.read_u8()?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.guard(1)?;
        let v = self.src.read_i8()?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.guard(2)?;
        let v = self.src.read_u16::<LittleEndian>()?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.guard(2)?;
        let v = self.src.read_i16::<LittleEndian>()?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.guard(4)?;
        let v = self.src.read_u32::<LittleEndian>()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.guard(4)?;
        let v = self.src.read_i32::<LittleEndian>()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.guard(8)?;
        let v = self.src.read_u64::<LittleEndian>()?;
        self.pos += 8;
        Ok(v)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.guard(8)?;
        let v = self.src.read_i64::<LittleEndian>()?;
        self.pos += 8;
        Ok(v)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.guard(4)?;
        let v = self.src.read_f32::<LittleEndian>()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.guard(8)?;
        let v = self.src.read_f64::<LittleEndian>()?;
        self.pos += 8;
        Ok(v)
    }

    /// Wide boolean, serialized as an int32. Any value other than 0 or 1
    /// is stream corruption, not truthiness.
    pub fn read_bool(&mut self) -> Result<bool> {
        let position = self.pos;
        let value = self.read_i32()?;
        match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool {
                value: i64::from(value),
                position,
            }),
        }
    }

    /// Narrow boolean, serialized as a single byte with the same {0,1}
    /// restriction as [`Self::read_bool`].
    pub fn read_flag(&mut self) -> Result<bool> {
        let position = self.pos;
        let value = self.read_u8()?;
        match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool {
                value: i64::from(value),
                position,
            }),
        }
    }

    /// 7-bit variable-length unsigned integer: low 7 bits of each byte,
    /// least-significant group first, top bit as continuation.
    ///
    /// The encoding itself has no length limit; an encoding that does
    /// not fit 64 payload bits - a continuation past the tenth byte, or
    /// a tenth byte carrying more than the one remaining bit - cannot be
    /// a valid value and fails as corruption instead of looping or
    /// silently truncating.
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift == 63 && byte & 0x7E != 0 {
                return Err(Error::VarIntTooLong { position: start });
            }
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift > 63 {
                return Err(Error::VarIntTooLong { position: start });
            }
        }
        Ok(value)
    }

    /// Short identifier string: one length byte, then raw UTF-8 with no
    /// terminator.
    pub fn read_short_string(&mut self) -> Result<String> {
        let position = self.pos;
        let length = self.read_u8()?;
        let bytes = self.read_bytes(length as usize)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { position })
    }

    /// General string (`FString`): int32 length prefix doubling as an
    /// encoding switch.
    ///
    /// Non-negative length means UTF-8 bytes with the last byte being a
    /// null terminator; negative means `-length` UTF-16 code units with
    /// the last unit as terminator. The wide path maps one unit to one
    /// character - surrogate pairs are never combined, a lone surrogate
    /// decodes to U+FFFD. A length of exactly `i32::MIN` is corruption.
    pub fn read_fstring(&mut self) -> Result<String> {
        let position = self.pos;
        let length = self.read_i32()?;

        if length == i32::MIN {
            return Err(Error::CorruptStringLength { position });
        }
        if length == 0 {
            return Ok(String::new());
        }

        if length < 0 {
            let units = (-length) as usize;
            let mut out = String::with_capacity(units - 1);
            for i in 0..units {
                let unit = self.read_u16()?;
                if i == units - 1 {
                    // terminator
                    continue;
                }
                out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Ok(out)
        } else {
            let bytes = self.read_bytes(length as usize)?;
            let body = &bytes[..bytes.len() - 1];
            std::str::from_utf8(body)
                .map(str::to_owned)
                .map_err(|_| Error::InvalidUtf8 { position })
        }
    }
}
