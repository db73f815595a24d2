use thiserror::Error;

/// Errors raised while decoding or encoding package data.
///
/// Every variant here is fatal to the current decode: the cursor can no
/// longer be trusted once one is raised. The one recoverable condition in
/// the format - an object reference whose target cannot be materialized -
/// is deliberately not an `Error`; it is logged and resolved to `None`
/// (see [`crate::reader::AssetReader::read_object`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("read of {requested} bytes at offset {position} exceeds stream size {size}")]
    ReadOverrun {
        position: u64,
        requested: u64,
        size: u64,
    },

    #[error("seek to {target} is outside the stream (size {size})")]
    SeekOutOfRange { target: i64, size: u64 },

    #[error("invalid boolean value {value} at offset {position}")]
    InvalidBool { value: i64, position: u64 },

    #[error("invalid UTF-8 in string at offset {position}")]
    InvalidUtf8 { position: u64 },

    #[error("corrupt string length prefix at offset {position}")]
    CorruptStringLength { position: u64 },

    #[error("string of {length} bytes does not fit a one-byte length prefix")]
    ShortStringTooLong { length: usize },

    #[error("variable-length integer at offset {position} does not fit in 64 bits")]
    VarIntTooLong { position: u64 },

    #[error("bulk array item size mismatch: declared {declared}, serialized {serialized} bytes per element")]
    BulkSizeMismatch { declared: i32, serialized: u64 },

    #[error("bad name index: {index}/{len} - reader position: {position}")]
    NameIndexOutOfRange {
        index: i32,
        len: usize,
        position: u64,
    },

    #[error("unsupported layout: {0}")]
    UnsupportedLayout(&'static str),
}
