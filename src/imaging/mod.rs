//! Imaging subsystem.
//!
//! # Data Flow
//! ```text
//! origin Content-Type
//!     → format.rs (SourceFormat: Jpeg | Png | Gif, or unsupported)
//! origin bytes + SourceFormat
//!     → codec.rs decode (DynamicImage)
//!     → codec.rs encode_jpeg (quality 1-100)
//!     → JPEG bytes
//! ```
//!
//! # Design Decisions
//! - No resizing: dimensions pass through unchanged
//! - Codec work is CPU-bound; callers run it on the blocking pool

pub mod codec;
pub mod format;

pub use codec::{decode, encode_jpeg, reencode, Quality};
pub use format::SourceFormat;
