use crate::codec;
use crate::consts::page_consts::ONE_SLOT_SIZE;
use crate::errors::codec_error::CodecError;
use crate::types::page_types::PageSlot;

impl PageSlot {
    /// An all-zero entry (slot_id 0) means the slot was never allocated.
    pub fn is_empty(&self) -> bool {
        self.slot_id == 0
    }

    pub fn to_bytes(&self) -> Result<[u8; ONE_SLOT_SIZE], CodecError> {
        let mut buf = [0u8; ONE_SLOT_SIZE];
        codec::write_u16(&mut buf, 0, self.slot_id)?;
        codec::write_u16(&mut buf, 2, self.offset)?;
        codec::write_u16(&mut buf, 4, self.row_size)?;
        codec::write_bool(&mut buf, 6, self.is_deleted)?;
        Ok(buf)
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            slot_id: codec::read_u16(buf, 0)?,
            offset: codec::read_u16(buf, 2)?,
            row_size: codec::read_u16(buf, 4)?,
            is_deleted: codec::read_bool(buf, 6)?,
        })
    }
}
