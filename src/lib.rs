//! Minimal relational storage engine: typed tables persisted as fixed-size
//! slotted pages in a single binary file per table, plus an in-memory
//! B+Tree index for key-based row lookup.

pub mod btree;
pub mod catalog;
pub mod codec;
pub mod consts;
pub mod errors;
pub mod registry;
pub mod row;
pub mod storage;
pub mod types;

pub use crate::btree::BPlusTree;
pub use crate::errors::codec_error::CodecError;
pub use crate::errors::storage_error::StorageError;
pub use crate::registry::TableRegistry;
pub use crate::types::page_types::RowLocator;
pub use crate::types::schema_types::{Column, ColumnType, MetaData};
pub use crate::types::value_types::{Row, Value, ValueType};
