//! Configuration types

pub mod app;
pub mod container;
pub mod logging;

pub use app::AppConfig;
pub use container::ContainerConfig;
pub use logging::LoggingConfig;
