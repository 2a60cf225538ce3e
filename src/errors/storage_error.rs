use crate::errors::codec_error::CodecError;
use crate::types::schema_types::ColumnType;
use crate::types::value_types::ValueType;
use thiserror::Error;

/// Errors surfaced by the page manager, the catalog and the table registry.
/// Every variant is recoverable: a failed operation leaves the file untouched.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("table already exists: {0}")]
    TableExists(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("page {0} is outside the table file")]
    PageNotFound(u32),

    #[error("no slot {slot_id} on page {page_id}")]
    SlotNotFound { page_id: u32, slot_id: u16 },

    #[error("no page with room for a row of {row_size} bytes")]
    PageFull { row_size: usize },

    #[error("row of {row_size} bytes can never fit a page (data space is {max} bytes)")]
    RowTooLarge { row_size: usize, max: usize },

    #[error("type mismatch at column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        got: ValueType,
    },

    #[error("column '{0}' is not nullable")]
    NullViolation(String),

    #[error("too many columns: {0} (max 32)")]
    TooManyColumns(usize),
}
