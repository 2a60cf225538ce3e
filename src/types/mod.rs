pub mod page_types;
pub mod schema_types;
pub mod value_types;
