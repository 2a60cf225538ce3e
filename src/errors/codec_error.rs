use thiserror::Error;

/// Errors raised by the binary codec and the row/metadata formats built on it.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("access of {len} bytes at offset {offset} is out of bounds for a buffer of {buf_len}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buf_len: usize,
    },

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("unknown column type tag: {0}")]
    UnknownTypeTag(u8),

    #[error("invalid utf-8 in string field: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected {expected} values, but got {got}")]
    ColumnCountMismatch { expected: usize, got: usize },
}
