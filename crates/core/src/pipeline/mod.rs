pub mod blob_directory_use_case;
pub mod blob_image_use_case;
pub mod output_dir;
