//! Face blob overlay library.
//!
//! Detects faces with a YOLO model and paints an opaque, soft-edged blob
//! over each one. Bounded contexts follow a domain / infrastructure split:
//! traits live under `domain`, concrete adapters under `infrastructure`,
//! and `pipeline` wires them into per-image and per-directory use cases.

pub mod blobbing;
pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod shared;
