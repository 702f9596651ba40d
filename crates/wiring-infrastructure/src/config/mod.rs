//! Configuration
//!
//! Typed configuration sections plus a Figment-based loader that merges
//! defaults, a TOML file and `WIRING__` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, ContainerConfig, LoggingConfig};
