use std::fmt;

// Supported data types for columns. The discriminant order fixes the
// on-disk type tags (see `ColumnType::tag`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Bool,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnType::Int32 => "INT32",
            ColumnType::Int64 => "INT64",
            ColumnType::UInt32 => "UINT32",
            ColumnType::UInt64 => "UINT64",
            ColumnType::Bool => "BOOL",
            ColumnType::Text => "TEXT",
        })
    }
}

/// One column of a table schema. Immutable once the table is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl Column {
    pub fn new(name: &str, column_type: ColumnType, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            nullable,
        }
    }
}

/// Table schema persisted at the start of the table file. Owns the column
/// ordering that every row encoding depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaData {
    pub name: String,
    pub page_count: u32,
    pub columns: Vec<Column>,
}
