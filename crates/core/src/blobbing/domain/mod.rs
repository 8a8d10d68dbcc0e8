pub mod frame_blobber;
pub mod mask;
