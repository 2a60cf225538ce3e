use crate::consts::page_consts::{
    DATA_SPACE, MAX_SLOTS, ONE_SLOT_SIZE, PAGE_HEADER_SIZE, PAGE_SIZE, SLOTS_SPACE,
};
use crate::errors::codec_error::CodecError;
use crate::errors::storage_error::StorageError;
use crate::types::page_types::{Page, PageHeader, PageSlot};

impl Page {
    pub fn new(page_id: u32) -> Self {
        // zero-filled slot directory and data region; `to_bytes` stamps the
        // header over the first bytes on every write-out
        Self {
            header: PageHeader::new(page_id),
            data: [0u8; PAGE_SIZE],
        }
    }

    pub fn to_bytes(&self) -> Result<[u8; PAGE_SIZE], CodecError> {
        let mut buf = self.data;
        let header = self.header.to_bytes()?;
        buf[0..PAGE_HEADER_SIZE].copy_from_slice(&header);
        Ok(buf)
    }

    pub fn from_bytes(buf: [u8; PAGE_SIZE]) -> Result<Self, CodecError> {
        let header = PageHeader::from_bytes(&buf[0..PAGE_HEADER_SIZE])?;
        Ok(Self { header, data: buf })
    }

    /// Reads the allocated portion of the slot directory.
    pub fn slots(&self) -> Result<Vec<PageSlot>, CodecError> {
        let mut slots = Vec::with_capacity(self.header.slots_amount as usize);
        for i in 0..self.header.slots_amount as usize {
            let pos = PAGE_HEADER_SIZE + i * ONE_SLOT_SIZE;
            slots.push(PageSlot::from_bytes(&self.data[pos..pos + ONE_SLOT_SIZE])?);
        }
        Ok(slots)
    }

    /// Finds the slot with the given id. Slot id 0 is reserved for "empty"
    /// and never matches.
    pub fn find_slot(&self, slot_id: u16) -> Result<Option<PageSlot>, CodecError> {
        if slot_id == 0 {
            return Ok(None);
        }
        for slot in self.slots()? {
            if !slot.is_empty() && slot.slot_id == slot_id {
                return Ok(Some(slot));
            }
        }
        Ok(None)
    }

    /// First-fit condition: enough contiguous free space and a free slot.
    pub fn has_room_for(&self, row_size: usize) -> bool {
        (self.header.slots_amount as usize) < MAX_SLOTS
            && (self.header.free_space as usize) >= row_size
    }

    /// Allocates the next slot and writes the serialized row at the tail of
    /// the used data region. Rows pack from the high end of the page toward
    /// the slot directory. Returns the new slot id.
    pub fn insert_row_bytes(&mut self, bytes: &[u8]) -> Result<u16, StorageError> {
        if bytes.len() > DATA_SPACE {
            return Err(StorageError::RowTooLarge {
                row_size: bytes.len(),
                max: DATA_SPACE,
            });
        }
        if !self.has_room_for(bytes.len()) {
            return Err(StorageError::PageFull {
                row_size: bytes.len(),
            });
        }

        // tail of the previous row, or the page end for the first slot;
        // deleted rows keep their bytes, so the tail never moves back
        let slots = self.slots()?;
        let tail = slots.last().map_or(PAGE_SIZE, |s| s.offset as usize);
        let offset = tail - bytes.len();

        let slot = PageSlot {
            slot_id: self.header.slots_amount + 1,
            offset: offset as u16,
            row_size: bytes.len() as u16,
            is_deleted: false,
        };
        let pos = PAGE_HEADER_SIZE + self.header.slots_amount as usize * ONE_SLOT_SIZE;
        self.data[pos..pos + ONE_SLOT_SIZE].copy_from_slice(&slot.to_bytes()?);
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);

        self.header.slots_amount += 1;
        self.header.free_space -= bytes.len() as u16;
        Ok(slot.slot_id)
    }

    /// Byte range of a row within the page.
    pub fn row_bytes(&self, slot: &PageSlot) -> Result<&[u8], CodecError> {
        let lo = slot.offset as usize;
        let hi = lo + slot.row_size as usize;
        if lo < PAGE_HEADER_SIZE + SLOTS_SPACE || hi > PAGE_SIZE {
            return Err(CodecError::Corrupt(format!(
                "slot {} points outside the data region: [{}, {})",
                slot.slot_id, lo, hi
            )));
        }
        Ok(&self.data[lo..hi])
    }

    /// Marks a slot deleted without reclaiming its space.
    pub fn mark_deleted(&mut self, slot_id: u16) -> Result<(), StorageError> {
        let slots = self.slots()?;
        for (i, slot) in slots.iter().enumerate() {
            if slot.is_empty() || slot.slot_id != slot_id {
                continue;
            }
            if slot.is_deleted {
                break; // already gone; report as not found
            }
            let mut updated = *slot;
            updated.is_deleted = true;
            let pos = PAGE_HEADER_SIZE + i * ONE_SLOT_SIZE;
            self.data[pos..pos + ONE_SLOT_SIZE].copy_from_slice(&updated.to_bytes()?);
            return Ok(());
        }
        Err(StorageError::SlotNotFound {
            page_id: self.header.page_id,
            slot_id,
        })
    }
}
