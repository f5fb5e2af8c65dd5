pub mod exiftool_metadata_store;
pub mod tool_locator;
