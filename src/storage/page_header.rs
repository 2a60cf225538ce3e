use crate::codec;
use crate::consts::page_consts::{DATA_SPACE, PAGE_HEADER_SIZE};
use crate::errors::codec_error::CodecError;
use crate::types::page_types::PageHeader;

impl PageHeader {
    pub fn new(page_id: u32) -> Self {
        Self {
            page_id,
            free_space: DATA_SPACE as u16, // whole data region is free
            slots_amount: 0,
        }
    }

    pub fn to_bytes(&self) -> Result<[u8; PAGE_HEADER_SIZE], CodecError> {
        let mut buf = [0u8; PAGE_HEADER_SIZE];
        // serialize fields; the remaining bytes stay zero padding
        codec::write_u32(&mut buf, 0, self.page_id)?;
        codec::write_u16(&mut buf, 4, self.free_space)?;
        codec::write_u16(&mut buf, 6, self.slots_amount)?;
        Ok(buf)
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            page_id: codec::read_u32(buf, 0)?,
            free_space: codec::read_u16(buf, 4)?,
            slots_amount: codec::read_u16(buf, 6)?,
        })
    }
}
