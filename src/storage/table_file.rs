use crate::consts::page_consts::{DATA_SPACE, INITIAL_PAGE_ID, PAGE_SIZE};
use crate::errors::codec_error::CodecError;
use crate::errors::storage_error::StorageError;
use crate::row;
use crate::storage::scan::TableScan;
use crate::types::page_types::{Page, RowLocator};
use crate::types::schema_types::{Column, ColumnType, MetaData};
use crate::types::value_types::{Row, Value};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// One table persisted as a single binary file: variable-length metadata
/// region followed by fixed-size pages. The file is opened per operation;
/// callers serialize writers externally (see `TableRegistry`).
#[derive(Debug, Clone)]
pub struct TableFile {
    path: PathBuf,
    meta: MetaData,
    metadata_space: u64, // file offset at which page 1 begins
}

impl TableFile {
    /// Creates the table file: metadata region plus one zero-filled initial
    /// page. Fails with `TableExists` if the file is already there.
    pub fn create<P: AsRef<Path>>(
        path: P,
        name: &str,
        columns: Vec<Column>,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let meta = MetaData::new(name, columns)?;
        let bytes = meta.encode()?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::TableExists(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&bytes)?;

        let page = Page::new(INITIAL_PAGE_ID);
        file.write_all(&page.to_bytes()?)?;
        file.sync_all()?;

        Ok(Self {
            path: path.to_path_buf(),
            meta,
            metadata_space: bytes.len() as u64,
        })
    }

    /// Opens an existing table file and loads its metadata.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::TableNotFound(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let (meta, metadata_space) = MetaData::load(&mut file)?;
        Ok(Self {
            path: path.to_path_buf(),
            meta,
            metadata_space: metadata_space as u64,
        })
    }

    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    pub fn columns(&self) -> &[Column] {
        &self.meta.columns
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn metadata_space(&self) -> u64 {
        self.metadata_space
    }

    /// Number of pages actually present in the file. The metadata's
    /// `page_count` is advisory bookkeeping; the file length decides.
    pub fn page_count_on_disk(&self) -> Result<u32, StorageError> {
        let len = std::fs::metadata(&self.path)?.len();
        Ok((len.saturating_sub(self.metadata_space) / PAGE_SIZE as u64) as u32)
    }

    fn page_start(&self, page_id: u32) -> u64 {
        self.metadata_space + (page_id - 1) as u64 * PAGE_SIZE as u64
    }

    pub fn read_page(&self, page_id: u32) -> Result<Page, StorageError> {
        if page_id < INITIAL_PAGE_ID || page_id > self.page_count_on_disk()? {
            return Err(StorageError::PageNotFound(page_id));
        }
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.page_start(page_id)))?;
        let mut buf = [0u8; PAGE_SIZE];
        file.read_exact(&mut buf)?;
        Ok(Page::from_bytes(buf)?)
    }

    pub fn write_page(&self, page: &Page) -> Result<(), StorageError> {
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(self.page_start(page.header.page_id)))?;
        file.write_all(&page.to_bytes()?)?;
        file.sync_all()?;
        Ok(())
    }

    /// Appends a zeroed page with the next id and bumps `page_count` in the
    /// metadata region, keeping the bookkeeping in step with allocation.
    pub fn allocate_page(&mut self) -> Result<u32, StorageError> {
        let page_id = self.page_count_on_disk()? + 1;
        let page = Page::new(page_id);

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(&page.to_bytes()?)?;
        file.sync_all()?;

        self.meta.page_count += 1;
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(self.meta.page_count_field_offset()))?;
        file.write_all(&self.meta.page_count.to_be_bytes())?;
        file.sync_all()?;

        Ok(page_id)
    }

    /// Inserts a row into the first page with room (first-fit, page-id
    /// order). Returns `PageFull` when no existing page qualifies; growing
    /// the file is the caller's decision (`allocate_page`).
    pub fn insert_row(&mut self, row: &Row) -> Result<RowLocator, StorageError> {
        self.validate_row(row)?;
        let bytes = row::encode(row, &self.meta.columns)?;
        if bytes.len() > DATA_SPACE {
            return Err(StorageError::RowTooLarge {
                row_size: bytes.len(),
                max: DATA_SPACE,
            });
        }

        let page_count = self.page_count_on_disk()?;
        for page_id in INITIAL_PAGE_ID..=page_count {
            let mut page = self.read_page(page_id)?;
            if !page.has_room_for(bytes.len()) {
                continue;
            }
            let slot_id = page.insert_row_bytes(&bytes)?;
            self.write_page(&page)?;
            return Ok(RowLocator { page_id, slot_id });
        }
        Err(StorageError::PageFull {
            row_size: bytes.len(),
        })
    }

    pub fn read_row(&self, page_id: u32, slot_id: u16) -> Result<Row, StorageError> {
        let page = self.read_page(page_id)?;
        let slot = page
            .find_slot(slot_id)?
            .filter(|s| !s.is_deleted)
            .ok_or(StorageError::SlotNotFound { page_id, slot_id })?;
        let bytes = page.row_bytes(&slot)?;
        Ok(row::decode(bytes, &self.meta.columns)?)
    }

    /// Marks the row's slot deleted. The bytes stay in place; compaction is
    /// not implemented.
    pub fn delete_row(&self, page_id: u32, slot_id: u16) -> Result<(), StorageError> {
        let mut page = self.read_page(page_id)?;
        page.mark_deleted(slot_id)?;
        self.write_page(&page)
    }

    /// Lazy scan over all live rows in page-id, then slot-id order. Calling
    /// `scan` again restarts from the beginning.
    pub fn scan(&self) -> Result<TableScan, StorageError> {
        TableScan::new(self)
    }

    // Insert-time validation: arity, per-column type compatibility and
    // nullability, all reported as typed errors before anything is written.
    fn validate_row(&self, row: &Row) -> Result<(), StorageError> {
        let columns = &self.meta.columns;
        if row.values.len() != columns.len() {
            return Err(CodecError::ColumnCountMismatch {
                expected: columns.len(),
                got: row.values.len(),
            }
            .into());
        }
        for (value, column) in row.values.iter().zip(columns) {
            if value.is_null() {
                if !column.nullable {
                    return Err(StorageError::NullViolation(column.name.clone()));
                }
                continue;
            }
            let compatible = matches!(
                (value, column.column_type),
                (Value::Int32(_), ColumnType::Int32)
                    | (Value::Int64(_), ColumnType::Int64)
                    | (Value::UInt32(_), ColumnType::UInt32)
                    | (Value::UInt64(_), ColumnType::UInt64)
                    | (Value::Bool(_), ColumnType::Bool)
                    | (Value::Text(_), ColumnType::Text)
            );
            if !compatible {
                return Err(StorageError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.column_type,
                    got: value.vtype(),
                });
            }
        }
        Ok(())
    }
}
