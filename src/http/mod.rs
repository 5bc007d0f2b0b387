//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, request deadline)
//!     → request.rs (path mode or url mode, quality, forwarded headers)
//!     → origin fetch + imaging re-encode
//!     → response.rs (JPEG or diagnostic, image headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ImageRequest, ProxySettings};
pub use response::ProxyResponse;
pub use server::{AppState, HttpServer, X_REQUEST_ID};
