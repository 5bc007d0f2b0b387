//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, OYAKI_ORIGIN_HOST override)
//!     → validation.rs (semantic checks)
//!     → OyakiConfig (validated, immutable)
//!     → handed to HttpServer::new, never re-read per request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    BodyEncoding, EncodeConfig, FetchConfig, ListenerConfig, ObservabilityConfig, OriginConfig,
    OyakiConfig, TimeoutConfig,
};
pub use validation::ValidationError;
