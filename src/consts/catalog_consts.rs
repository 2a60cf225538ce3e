pub const MANIFEST_FILE: &str = "manifest.json"; // registry manifest inside the data directory
pub const MANIFEST_VERSION: u32 = 1; // bumped on incompatible manifest changes
pub const TABLE_FILE_EXT: &str = "data"; // per-table binary file extension
pub const MAX_COLUMNS: usize = 32; // nullable/null bitmaps are a single u32
