pub mod metadata_store;
pub mod tag_reconciler;
