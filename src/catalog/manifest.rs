//! Registry manifest: a small JSON file in the data directory listing every
//! table and its file. The per-table binary metadata stays authoritative
//! for schemas; the manifest only maps names to files.

use crate::consts::catalog_consts::{MANIFEST_FILE, MANIFEST_VERSION};
use crate::consts::page_consts::PAGE_SIZE;
use crate::errors::storage_error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub page_size: u32,
    pub tables: BTreeMap<String, TableEntry>,
}

impl Manifest {
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            page_size: PAGE_SIZE as u32,
            tables: BTreeMap::new(),
        }
    }
}

pub fn load_or_create(data_dir: &Path) -> Result<Manifest, StorageError> {
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(MANIFEST_FILE);
    if !path.exists() {
        let manifest = Manifest::empty();
        save_atomic(data_dir, &manifest)?;
        return Ok(manifest);
    }
    let f = File::open(&path)?;
    let reader = BufReader::new(f);
    let manifest: Manifest = serde_json::from_reader(reader)?;
    validate(&manifest)?;
    Ok(manifest)
}

pub fn validate(manifest: &Manifest) -> Result<(), StorageError> {
    if manifest.version != MANIFEST_VERSION {
        return Err(StorageError::InvalidManifest(format!(
            "unsupported version {}",
            manifest.version
        )));
    }
    if manifest.page_size != PAGE_SIZE as u32 {
        return Err(StorageError::InvalidManifest(format!(
            "page_size mismatch: manifest={}, expected={}",
            manifest.page_size, PAGE_SIZE
        )));
    }

    let mut files = HashSet::new();
    for (name, entry) in &manifest.tables {
        if entry.file.is_empty() {
            return Err(StorageError::InvalidManifest(format!(
                "table {name} has no file"
            )));
        }
        if !files.insert(entry.file.clone()) {
            return Err(StorageError::InvalidManifest(format!(
                "file reused by multiple tables: {}",
                entry.file
            )));
        }
    }
    Ok(())
}

/// Writes the manifest through a temp file and renames it into place, so a
/// crash mid-save never leaves a truncated manifest behind.
pub fn save_atomic(data_dir: &Path, manifest: &Manifest) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::create_dir_all(data_dir)?;
    let tmp = NamedTempFile::new_in(data_dir)?;
    {
        let mut f = tmp.as_file();
        f.write_all(json.as_bytes())?;
        f.sync_all()?;
    }
    let final_path = data_dir.join(MANIFEST_FILE);
    tmp.persist(&final_path)
        .map_err(|e| StorageError::InvalidManifest(format!("persist failed: {}", e)))?;

    #[cfg(unix)]
    {
        let dirfd = File::open(data_dir)?;
        dirfd.sync_all()?;
    }
    Ok(())
}
