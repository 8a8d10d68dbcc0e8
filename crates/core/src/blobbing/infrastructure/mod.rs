pub mod cpu_mask_blobber;
pub mod gaussian;
pub mod mask_builder;
