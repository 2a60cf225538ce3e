use crate::consts::page_consts::PAGE_SIZE;

/// Fixed part of every page, mirrored into the first bytes of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    pub page_id: u32,
    pub free_space: u16,
    pub slots_amount: u16,
}

/// One slot directory entry: where a row's bytes live within the page.
/// `slot_id == 0` marks an empty/unused entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    pub slot_id: u16,
    pub offset: u16,
    pub row_size: u16,
    pub is_deleted: bool,
}

/// Fixed-size unit of disk I/O: header, slot directory, data region.
pub struct Page {
    pub header: PageHeader,
    pub data: [u8; PAGE_SIZE],
}

/// Stable address of a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLocator {
    pub page_id: u32,
    pub slot_id: u16,
}
