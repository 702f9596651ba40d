//! Application configuration root

use serde::{Deserialize, Serialize};

use super::{ContainerConfig, LoggingConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Container behaviour
    pub container: ContainerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}
