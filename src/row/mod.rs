//! Row codec: converts a row to/from its packed binary form. The encoding
//! is a leading u32 null bitmap (bit i set iff column i is null) followed
//! by the non-null values in schema order. Null cells contribute no value
//! bytes, only their bitmap bit.

use crate::codec;
use crate::consts::catalog_consts::MAX_COLUMNS;
use crate::errors::codec_error::CodecError;
use crate::types::schema_types::{Column, ColumnType};
use crate::types::value_types::{Row, Value};

/// Exact encoded size of a row: bitmap bytes plus each non-null cell's
/// width. Also validates that values line up with the column types.
pub fn encoded_size(row: &Row, columns: &[Column]) -> Result<usize, CodecError> {
    check_shape(row, columns)?;
    let mut size = 4; // null bitmap
    for (value, column) in row.values.iter().zip(columns) {
        size += match (value, column.column_type) {
            (Value::Null, _) => 0,
            (Value::Int32(_), ColumnType::Int32) => 4,
            (Value::Int64(_), ColumnType::Int64) => 8,
            (Value::UInt32(_), ColumnType::UInt32) => 4,
            (Value::UInt64(_), ColumnType::UInt64) => 8,
            (Value::Bool(_), ColumnType::Bool) => 1,
            (Value::Text(s), ColumnType::Text) => codec::string_size(s),
            _ => {
                return Err(CodecError::Corrupt(format!(
                    "value {} does not match column '{}' of type {}",
                    value.vtype(),
                    column.name,
                    column.column_type
                )))
            }
        };
    }
    Ok(size)
}

pub fn encode(row: &Row, columns: &[Column]) -> Result<Vec<u8>, CodecError> {
    let size = encoded_size(row, columns)?;
    let mut buf = vec![0u8; size];

    let mut bitmap = 0u32;
    for (i, value) in row.values.iter().enumerate() {
        if value.is_null() {
            bitmap |= 1 << i;
        }
    }
    let mut off = codec::write_u32(&mut buf, 0, bitmap)?;

    for value in &row.values {
        off += match value {
            Value::Null => 0,
            Value::Int32(v) => codec::write_i32(&mut buf, off, *v)?,
            Value::Int64(v) => codec::write_i64(&mut buf, off, *v)?,
            Value::UInt32(v) => codec::write_u32(&mut buf, off, *v)?,
            Value::UInt64(v) => codec::write_u64(&mut buf, off, *v)?,
            Value::Bool(v) => codec::write_bool(&mut buf, off, *v)?,
            Value::Text(s) => codec::write_string(&mut buf, off, s)?,
        };
    }
    debug_assert_eq!(off, size);
    Ok(buf)
}

pub fn decode(bytes: &[u8], columns: &[Column]) -> Result<Row, CodecError> {
    if columns.len() > MAX_COLUMNS {
        return Err(CodecError::Corrupt(format!(
            "schema with {} columns exceeds the bitmap width",
            columns.len()
        )));
    }
    let bitmap = codec::read_u32(bytes, 0)?;
    let mut off = 4;
    let mut values = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        if bitmap & (1 << i) != 0 {
            values.push(Value::Null);
            continue;
        }
        match column.column_type {
            ColumnType::Int32 => {
                values.push(Value::Int32(codec::read_i32(bytes, off)?));
                off += 4;
            }
            ColumnType::Int64 => {
                values.push(Value::Int64(codec::read_i64(bytes, off)?));
                off += 8;
            }
            ColumnType::UInt32 => {
                values.push(Value::UInt32(codec::read_u32(bytes, off)?));
                off += 4;
            }
            ColumnType::UInt64 => {
                values.push(Value::UInt64(codec::read_u64(bytes, off)?));
                off += 8;
            }
            ColumnType::Bool => {
                values.push(Value::Bool(codec::read_bool(bytes, off)?));
                off += 1;
            }
            ColumnType::Text => {
                let (s, consumed) = codec::read_string(bytes, off)?;
                values.push(Value::Text(s));
                off += consumed;
            }
        }
    }
    if off != bytes.len() {
        return Err(CodecError::Corrupt(format!(
            "row has {} trailing bytes",
            bytes.len() - off
        )));
    }
    Ok(Row { values })
}

fn check_shape(row: &Row, columns: &[Column]) -> Result<(), CodecError> {
    if columns.len() > MAX_COLUMNS {
        return Err(CodecError::Corrupt(format!(
            "schema with {} columns exceeds the bitmap width",
            columns.len()
        )));
    }
    if row.values.len() != columns.len() {
        return Err(CodecError::ColumnCountMismatch {
            expected: columns.len(),
            got: row.values.len(),
        });
    }
    Ok(())
}
