pub const PAGE_SIZE: usize = 4096; // total page size in bytes (4 KB)
pub const PAGE_HEADER_SIZE: usize = 16; // bytes reserved for page header (8 used + padding)
pub const ONE_SLOT_SIZE: usize = 8; // size of one slot directory entry (7 used + padding)
pub const MAX_SLOTS: usize = 32; // hard cap on rows per page
pub const SLOTS_SPACE: usize = ONE_SLOT_SIZE * MAX_SLOTS; // bytes taken by the slot directory
pub const DATA_SPACE: usize = PAGE_SIZE - PAGE_HEADER_SIZE - SLOTS_SPACE; // bytes left for row data
pub const INITIAL_PAGE_ID: u32 = 1; // page ids are 1-based; 0 is never a valid page
