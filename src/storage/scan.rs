use crate::consts::page_consts::{INITIAL_PAGE_ID, ONE_SLOT_SIZE, PAGE_HEADER_SIZE, PAGE_SIZE};
use crate::errors::storage_error::StorageError;
use crate::row;
use crate::storage::table_file::TableFile;
use crate::types::page_types::{Page, PageSlot, RowLocator};
use crate::types::schema_types::Column;
use crate::types::value_types::Row;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

/// Lazy iterator over the live rows of a table, in page-id then slot-id
/// order. Owns its own file handle, so it survives the registry lock being
/// released; deleted and empty slots are skipped.
pub struct TableScan {
    file: File,
    columns: Vec<Column>,
    metadata_space: u64,
    page_count: u32,
    page: Option<Page>,
    next_page_id: u32,
    next_slot_index: usize,
}

impl TableScan {
    pub(crate) fn new(table: &TableFile) -> Result<Self, StorageError> {
        let file = File::open(table.path())?;
        let page_count = table.page_count_on_disk()?;
        Ok(Self {
            file,
            columns: table.columns().to_vec(),
            metadata_space: table.metadata_space(),
            page_count,
            page: None,
            next_page_id: INITIAL_PAGE_ID,
            next_slot_index: 0,
        })
    }

    fn load_page(&mut self, page_id: u32) -> Result<Page, StorageError> {
        let start = self.metadata_space + (page_id - 1) as u64 * PAGE_SIZE as u64;
        self.file.seek(SeekFrom::Start(start))?;
        let mut buf = [0u8; PAGE_SIZE];
        self.file.read_exact(&mut buf)?;
        Ok(Page::from_bytes(buf)?)
    }
}

impl Iterator for TableScan {
    type Item = Result<(RowLocator, Row), StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.page.is_none() {
                if self.next_page_id > self.page_count {
                    return None;
                }
                match self.load_page(self.next_page_id) {
                    Ok(page) => {
                        self.page = Some(page);
                        self.next_slot_index = 0;
                    }
                    Err(e) => {
                        // stop the scan instead of retrying a broken page
                        self.next_page_id = self.page_count + 1;
                        return Some(Err(e));
                    }
                }
            }

            let (slots_amount, page_id) = match self.page.as_ref() {
                Some(p) => (p.header.slots_amount as usize, p.header.page_id),
                None => return None,
            };
            if self.next_slot_index >= slots_amount {
                self.page = None;
                self.next_page_id += 1;
                continue;
            }
            let idx = self.next_slot_index;
            self.next_slot_index += 1;

            let Some(page) = self.page.as_ref() else {
                return None;
            };
            let pos = PAGE_HEADER_SIZE + idx * ONE_SLOT_SIZE;
            let slot = match PageSlot::from_bytes(&page.data[pos..pos + ONE_SLOT_SIZE]) {
                Ok(slot) => slot,
                Err(e) => return Some(Err(e.into())),
            };
            if slot.is_empty() || slot.is_deleted {
                continue;
            }
            let bytes = match page.row_bytes(&slot) {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(e.into())),
            };
            return match row::decode(bytes, &self.columns) {
                Ok(row) => Some(Ok((
                    RowLocator {
                        page_id,
                        slot_id: slot.slot_id,
                    },
                    row,
                ))),
                Err(e) => Some(Err(e.into())),
            };
        }
    }
}
