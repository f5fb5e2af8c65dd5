pub mod batch_executor;
pub mod build_gallery_use_case;
pub mod infrastructure;
pub mod input_collector;
pub mod run_reporter;
pub mod tag_file_use_case;
