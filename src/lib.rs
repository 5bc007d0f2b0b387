//! oyaki: JPEG re-encoding image proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────────┐
//!                    │                    OYAKI                          │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌──────────────┐    │
//!   ─────────────────┼─▶│  http   │──▶│ request  │──▶│    origin    │────┼──▶ Origin
//!                    │  │ server  │   │ path|url │   │   fetcher    │◀───┼─── Server
//!                    │  └─────────┘   └──────────┘   └──────┬───────┘    │
//!                    │                                      ▼            │
//!   Client Response  │  ┌──────────┐               ┌──────────────┐     │
//!   ◀────────────────┼──│ response │◀──────────────│   imaging    │     │
//!                    │  │ JPEG/400 │               │ decode+JPEG  │     │
//!                    │  └──────────┘               └──────────────┘     │
//!                    │                                                   │
//!                    │  config · observability · lifecycle               │
//!                    └───────────────────────────────────────────────────┘
//! ```
//!
//! Only the encoding changes; image dimensions pass through untouched.

pub mod config;
pub mod error;
pub mod http;
pub mod imaging;
pub mod lifecycle;
pub mod observability;
pub mod origin;

pub use config::OyakiConfig;
pub use error::{ProxyError, ProxyResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
