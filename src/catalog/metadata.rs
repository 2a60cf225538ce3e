//! Binary table metadata, written at the start of every table file.
//!
//! Layout (all integers big-endian):
//! `[name: len-prefixed string][page_count: u32][column_count: u8]`
//! `[nullable_bitmap: u32][column_count x { name: len-prefixed string, type: u8 }]`

use crate::codec;
use crate::consts::catalog_consts::MAX_COLUMNS;
use crate::errors::codec_error::CodecError;
use crate::errors::storage_error::StorageError;
use crate::types::schema_types::{Column, ColumnType, MetaData};
use std::collections::HashSet;
use std::io::Read;

impl ColumnType {
    /// On-disk type tag.
    pub fn tag(&self) -> u8 {
        match self {
            ColumnType::Int32 => 0,
            ColumnType::Int64 => 1,
            ColumnType::UInt32 => 2,
            ColumnType::UInt64 => 3,
            ColumnType::Bool => 4,
            ColumnType::Text => 5,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(ColumnType::Int32),
            1 => Ok(ColumnType::Int64),
            2 => Ok(ColumnType::UInt32),
            3 => Ok(ColumnType::UInt64),
            4 => Ok(ColumnType::Bool),
            5 => Ok(ColumnType::Text),
            other => Err(CodecError::UnknownTypeTag(other)),
        }
    }
}

impl MetaData {
    /// Builds the schema for a new table, validating the column list.
    pub fn new(name: &str, columns: Vec<Column>) -> Result<Self, StorageError> {
        if columns.len() > MAX_COLUMNS {
            return Err(StorageError::TooManyColumns(columns.len()));
        }
        let mut seen = HashSet::new();
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                return Err(StorageError::InvalidSchema(format!(
                    "duplicate column '{}' in table {}",
                    c.name, name
                )));
            }
        }
        Ok(Self {
            name: name.to_string(),
            page_count: 1, // the initial page is written right after the metadata
            columns,
        })
    }

    /// Exact number of bytes the serialized metadata occupies. This is also
    /// the file offset at which page 1 begins.
    pub fn serialized_size(&self) -> usize {
        codec::string_size(&self.name)
            + 4 // page_count
            + 1 // column count
            + 4 // nullable bitmap
            + self
                .columns
                .iter()
                .map(|c| codec::string_size(&c.name) + 1)
                .sum::<usize>()
    }

    /// Byte offset of the `page_count` field, so it can be rewritten in
    /// place when a page is allocated.
    pub fn page_count_field_offset(&self) -> u64 {
        codec::string_size(&self.name) as u64
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let size = self.serialized_size();
        let mut buf = vec![0u8; size];
        let mut off = 0;
        off += codec::write_string(&mut buf, off, &self.name)?;
        off += codec::write_u32(&mut buf, off, self.page_count)?;
        off += codec::write_u8(&mut buf, off, self.columns.len() as u8)?;

        // bit i of the bitmap is set iff column i is nullable
        let mut bitmap = 0u32;
        for (i, c) in self.columns.iter().enumerate() {
            if c.nullable {
                bitmap |= 1 << i;
            }
        }
        off += codec::write_u32(&mut buf, off, bitmap)?;

        for c in &self.columns {
            off += codec::write_string(&mut buf, off, &c.name)?;
            off += codec::write_u8(&mut buf, off, c.column_type.tag())?;
        }
        debug_assert_eq!(off, size);
        Ok(buf)
    }

    /// Reads metadata sequentially from the start of a table file. Returns
    /// the schema and the number of bytes consumed (`metadata_space`).
    pub fn load<R: Read>(r: &mut R) -> Result<(Self, usize), StorageError> {
        let mut consumed = 0;

        let (name, n) = read_string_from(r)?;
        consumed += n;

        let page_count = codec::read_u32(&read_chunk(r, 4)?, 0)?;
        consumed += 4;

        let column_count = codec::read_u8(&read_chunk(r, 1)?, 0)? as usize;
        consumed += 1;
        if column_count > MAX_COLUMNS {
            return Err(StorageError::TooManyColumns(column_count));
        }

        let bitmap = codec::read_u32(&read_chunk(r, 4)?, 0)?;
        consumed += 4;

        let mut columns = Vec::with_capacity(column_count);
        for i in 0..column_count {
            let (col_name, n) = read_string_from(r)?;
            consumed += n;
            let tag = codec::read_u8(&read_chunk(r, 1)?, 0)?;
            consumed += 1;
            columns.push(Column {
                name: col_name,
                column_type: ColumnType::from_tag(tag)?,
                // nullability comes only from the bitmap, never from order
                nullable: bitmap & (1 << i) != 0,
            });
        }

        Ok((
            Self {
                name,
                page_count,
                columns,
            },
            consumed,
        ))
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Result<usize, StorageError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| StorageError::ColumnNotFound(name.to_string()))
    }
}

fn read_chunk<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>, StorageError> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_string_from<R: Read>(r: &mut R) -> Result<(String, usize), StorageError> {
    let len = codec::read_i32(&read_chunk(r, 4)?, 0)?;
    if len < 0 {
        return Err(
            CodecError::Corrupt(format!("negative string length prefix: {}", len)).into(),
        );
    }
    let bytes = read_chunk(r, len as usize)?;
    let s = String::from_utf8(bytes).map_err(CodecError::Utf8)?;
    Ok((s, 4 + len as usize))
}
