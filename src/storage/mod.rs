pub mod page;
pub mod page_header;
pub mod page_slot;
pub mod scan;
pub mod table_file;

pub use scan::TableScan;
pub use table_file::TableFile;
