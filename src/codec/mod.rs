//! Fixed-width and length-prefixed encode/decode primitives. All functions
//! operate on a caller-supplied buffer at an explicit offset and never
//! resize the buffer. Multi-byte integers are big-endian. Writers return
//! the number of bytes written so callers can advance their own cursor.

use crate::errors::codec_error::CodecError;

// Bounds check shared by every read/write below.
fn check(buf: &[u8], offset: usize, len: usize) -> Result<(), CodecError> {
    let fits = offset
        .checked_add(len)
        .map_or(false, |end| end <= buf.len());
    if !fits {
        return Err(CodecError::OutOfBounds {
            offset,
            len,
            buf_len: buf.len(),
        });
    }
    Ok(())
}

pub fn write_u8(buf: &mut [u8], offset: usize, v: u8) -> Result<usize, CodecError> {
    check(buf, offset, 1)?;
    buf[offset] = v;
    Ok(1)
}

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8, CodecError> {
    check(buf, offset, 1)?;
    Ok(buf[offset])
}

pub fn write_i8(buf: &mut [u8], offset: usize, v: i8) -> Result<usize, CodecError> {
    write_u8(buf, offset, v as u8)
}

pub fn read_i8(buf: &[u8], offset: usize) -> Result<i8, CodecError> {
    Ok(read_u8(buf, offset)? as i8)
}

pub fn write_u16(buf: &mut [u8], offset: usize, v: u16) -> Result<usize, CodecError> {
    check(buf, offset, 2)?;
    buf[offset..offset + 2].copy_from_slice(&v.to_be_bytes());
    Ok(2)
}

pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16, CodecError> {
    check(buf, offset, 2)?;
    let mut b = [0u8; 2];
    b.copy_from_slice(&buf[offset..offset + 2]);
    Ok(u16::from_be_bytes(b))
}

pub fn write_i16(buf: &mut [u8], offset: usize, v: i16) -> Result<usize, CodecError> {
    write_u16(buf, offset, v as u16)
}

pub fn read_i16(buf: &[u8], offset: usize) -> Result<i16, CodecError> {
    Ok(read_u16(buf, offset)? as i16)
}

pub fn write_u32(buf: &mut [u8], offset: usize, v: u32) -> Result<usize, CodecError> {
    check(buf, offset, 4)?;
    buf[offset..offset + 4].copy_from_slice(&v.to_be_bytes());
    Ok(4)
}

pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32, CodecError> {
    check(buf, offset, 4)?;
    let mut b = [0u8; 4];
    b.copy_from_slice(&buf[offset..offset + 4]);
    Ok(u32::from_be_bytes(b))
}

pub fn write_i32(buf: &mut [u8], offset: usize, v: i32) -> Result<usize, CodecError> {
    write_u32(buf, offset, v as u32)
}

pub fn read_i32(buf: &[u8], offset: usize) -> Result<i32, CodecError> {
    Ok(read_u32(buf, offset)? as i32)
}

pub fn write_u64(buf: &mut [u8], offset: usize, v: u64) -> Result<usize, CodecError> {
    check(buf, offset, 8)?;
    buf[offset..offset + 8].copy_from_slice(&v.to_be_bytes());
    Ok(8)
}

pub fn read_u64(buf: &[u8], offset: usize) -> Result<u64, CodecError> {
    check(buf, offset, 8)?;
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[offset..offset + 8]);
    Ok(u64::from_be_bytes(b))
}

pub fn write_i64(buf: &mut [u8], offset: usize, v: i64) -> Result<usize, CodecError> {
    write_u64(buf, offset, v as u64)
}

pub fn read_i64(buf: &[u8], offset: usize) -> Result<i64, CodecError> {
    Ok(read_u64(buf, offset)? as i64)
}

// Booleans occupy exactly one byte; writers emit only 0x00/0x01, readers
// accept any non-zero byte as true.
pub fn write_bool(buf: &mut [u8], offset: usize, v: bool) -> Result<usize, CodecError> {
    write_u8(buf, offset, if v { 1 } else { 0 })
}

pub fn read_bool(buf: &[u8], offset: usize) -> Result<bool, CodecError> {
    Ok(read_u8(buf, offset)? != 0)
}

/// Total encoded size of a string: 4-byte length prefix + UTF-8 bytes.
pub fn string_size(s: &str) -> usize {
    4 + s.len()
}

/// Strings are a 4-byte signed big-endian length prefix followed by the raw
/// UTF-8 bytes, no terminator and no padding.
pub fn write_string(buf: &mut [u8], offset: usize, s: &str) -> Result<usize, CodecError> {
    let bytes = s.as_bytes();
    if bytes.len() > i32::MAX as usize {
        return Err(CodecError::Corrupt(format!(
            "string of {} bytes exceeds the i32 length prefix",
            bytes.len()
        )));
    }
    check(buf, offset, string_size(s))?;
    write_i32(buf, offset, bytes.len() as i32)?;
    buf[offset + 4..offset + 4 + bytes.len()].copy_from_slice(bytes);
    Ok(string_size(s))
}

/// Reads a length-prefixed string; returns the text and the total byte
/// count consumed (4 + length).
pub fn read_string(buf: &[u8], offset: usize) -> Result<(String, usize), CodecError> {
    let len = read_i32(buf, offset)?;
    if len < 0 {
        return Err(CodecError::Corrupt(format!(
            "negative string length prefix: {}",
            len
        )));
    }
    let len = len as usize;
    check(buf, offset + 4, len)?;
    let s = String::from_utf8(buf[offset + 4..offset + 4 + len].to_vec())?;
    Ok((s, 4 + len))
}
