//! Explicit owner of the open tables in one data directory. Replaces any
//! ambient global table map: one caller owns the registry and passes it by
//! reference. Each table carries its own reader/writer lock, so inserts and
//! deletes are exclusive per table while reads may run concurrently.

use crate::catalog::manifest::{self, Manifest, TableEntry};
use crate::consts::catalog_consts::TABLE_FILE_EXT;
use crate::errors::storage_error::StorageError;
use crate::storage::{TableFile, TableScan};
use crate::types::page_types::RowLocator;
use crate::types::schema_types::{Column, MetaData};
use crate::types::value_types::Row;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct TableRegistry {
    data_dir: PathBuf,
    manifest: Manifest,
    tables: HashMap<String, RwLock<TableFile>>,
}

impl TableRegistry {
    /// Opens a data directory: loads (or creates) the manifest and opens
    /// every table file it lists.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let manifest = manifest::load_or_create(&data_dir)?;

        let mut tables = HashMap::new();
        for (name, entry) in &manifest.tables {
            let table = TableFile::open(data_dir.join(&entry.file))?;
            tables.insert(name.clone(), RwLock::new(table));
        }

        Ok(Self {
            data_dir,
            manifest,
            tables,
        })
    }

    /// Creates a new table: binary file with metadata and the initial page,
    /// plus a manifest entry saved atomically.
    pub fn create_table(
        &mut self,
        name: &str,
        columns: Vec<Column>,
    ) -> Result<MetaData, StorageError> {
        if self.manifest.tables.contains_key(name) {
            return Err(StorageError::TableExists(name.to_string()));
        }
        let file_name = format!("{name}.{TABLE_FILE_EXT}");
        let table = TableFile::create(self.data_dir.join(&file_name), name, columns)?;
        let meta = table.meta().clone();

        self.manifest
            .tables
            .insert(name.to_string(), TableEntry { file: file_name });
        manifest::save_atomic(&self.data_dir, &self.manifest)?;
        self.tables.insert(name.to_string(), RwLock::new(table));
        Ok(meta)
    }

    /// Drops a table: manifest entry first (saved atomically), then the
    /// file itself.
    pub fn drop_table(&mut self, name: &str) -> Result<(), StorageError> {
        let entry = self
            .manifest
            .tables
            .remove(name)
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()))?;
        self.tables.remove(name);
        manifest::save_atomic(&self.data_dir, &self.manifest)?;
        fs::remove_file(self.data_dir.join(entry.file))?;
        Ok(())
    }

    /// Inserts under the table's write lock. The engine itself reports
    /// `PageFull` and leaves growth to its caller; the registry is that
    /// caller, so it allocates one page and retries.
    pub fn insert_row(&self, name: &str, row: &Row) -> Result<RowLocator, StorageError> {
        let mut table = self.table(name)?.write();
        match table.insert_row(row) {
            Err(StorageError::PageFull { .. }) => {
                table.allocate_page()?;
                table.insert_row(row)
            }
            other => other,
        }
    }

    pub fn read_row(&self, name: &str, locator: RowLocator) -> Result<Row, StorageError> {
        self.table(name)?
            .read()
            .read_row(locator.page_id, locator.slot_id)
    }

    pub fn delete_row(&self, name: &str, locator: RowLocator) -> Result<(), StorageError> {
        self.table(name)?
            .write()
            .delete_row(locator.page_id, locator.slot_id)
    }

    /// Starts a lazy scan. The scan handle owns its own file descriptor, so
    /// the read lock is held only while it is being set up.
    pub fn scan_table(&self, name: &str) -> Result<TableScan, StorageError> {
        self.table(name)?.read().scan()
    }

    pub fn schema(&self, name: &str) -> Result<MetaData, StorageError> {
        Ok(self.table(name)?.read().meta().clone())
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<String> {
        self.manifest.tables.keys().cloned().collect()
    }

    fn table(&self, name: &str) -> Result<&RwLock<TableFile>, StorageError> {
        self.tables
            .get(name)
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }
}
