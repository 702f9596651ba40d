//! # Infrastructure Layer
//!
//! Runtime side of Wiring: registries, resolution, bootstrap, and the
//! ambient concerns around them.
//!
//! ## Module Categories
//!
//! ### Dependency Injection
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Provider registries, container, graph validation, bootstrap |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based TOML + environment configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`utils`] | Timing helpers |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader, ContainerConfig, LoggingConfig};
pub use di::{Application, Bootstrapper, Container, LifecycleState, ResolutionState};
pub use error_ext::ErrorContext;
pub use utils::TimedOperation;
