//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wiring.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wiring";

/// Environment variable prefix for configuration
///
/// Nested keys are separated by a double underscore, e.g.
/// `WIRING__CONTAINER__DEFAULT_SCOPE=transient`.
pub const CONFIG_ENV_PREFIX: &str = "WIRING";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CONTAINER CONSTANTS
// ============================================================================

/// Validate the whole dependency graph before bootstrap by default
pub const DEFAULT_VALIDATE_GRAPH: bool = true;

/// Resolve every singleton during bootstrap by default
pub const DEFAULT_EAGER_SINGLETONS: bool = false;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "WIRING_LOG";

/// Log file rotation size in bytes (10MB)
pub const LOG_ROTATION_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

// ============================================================================
// MODULE CONSTANTS
// ============================================================================

/// Deepest import chain compiled before it is reported as circular
pub const MAX_IMPORT_DEPTH: usize = 128;
