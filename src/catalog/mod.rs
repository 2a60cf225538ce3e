pub mod manifest;
pub mod metadata;
