//! Origin access subsystem.
//!
//! # Data Flow
//! ```text
//! ImageRequest
//!     → target.rs (OriginTarget: path mode or url mode, ForwardedHeaders)
//!     → fetcher.rs (single GET, size cap, timeouts)
//!     → FetchOutcome (image bytes + Content-Type + Last-Modified, or 304)
//! ```

pub mod fetcher;
pub mod target;

pub use fetcher::{FetchOutcome, FetchedImage, Fetcher};
pub use target::{ForwardedHeaders, OriginTarget};
