pub mod gallery;
pub mod identity;
pub mod matcher;
