//! Error handling types

use std::sync::Arc;

use thiserror::Error;

use crate::value_objects::Token;

/// Shared, clonable error source
///
/// Failed singleton slots replay their error on every later resolution,
/// so sources are reference counted instead of boxed.
pub type ErrorSource = Arc<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Wiring
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A provider was registered twice under the same token in one registry
    #[error("Duplicate provider for {token} in module '{module}'")]
    DuplicateToken {
        /// Module owning the registry
        module: String,
        /// The conflicting token
        token: Token,
    },

    /// No provider is visible for the token in the requesting module
    #[error("No provider for {token} in module '{module}'")]
    TokenNotFound {
        /// Module the resolution was requested from
        module: String,
        /// The missing token
        token: Token,
    },

    /// A resolution path revisited a token that is still being resolved
    #[error("Circular dependency detected: {}", display_path(.path))]
    CircularDependency {
        /// Tokens on the resolution path, ending with the re-entered token
        path: Vec<Token>,
    },

    /// An asynchronous factory failed during resolution
    #[error("Async provider for {token} rejected: {message}")]
    AsyncProviderRejection {
        /// Token the factory provides
        token: Token,
        /// Rendered rejection message
        message: String,
        /// Optional source error
        #[source]
        source: Option<ErrorSource>,
    },

    /// A constructor or synchronous factory returned an error
    #[error("Provider for {token} failed: {message}")]
    ProviderFailed {
        /// Token the provider produces
        token: Token,
        /// Rendered failure message
        message: String,
        /// Optional source error
        #[source]
        source: Option<ErrorSource>,
    },

    /// A resolved instance is not of the requested type
    #[error("Instance for {token} is not a {expected}")]
    TypeMismatch {
        /// Token that was resolved
        token: Token,
        /// Name of the type the caller asked for
        expected: &'static str,
    },

    /// A module exports a token it neither provides nor imports
    #[error("Module '{module}' exports {token}, which it neither provides nor imports")]
    UnknownExport {
        /// The exporting module
        module: String,
        /// The unknown token
        token: Token,
    },

    /// Module imports form a cycle
    #[error("Circular module import detected: {}", .path.join(" -> "))]
    CircularImport {
        /// Module names on the import path, ending with the re-entered module
        path: Vec<String>,
    },

    /// A module name did not match any module in the container
    #[error("Unknown module '{module}'")]
    UnknownModule {
        /// The requested module name
        module: String,
    },

    /// Bootstrap did not finish within the configured limit
    #[error("Bootstrap timed out after {elapsed_ms}ms")]
    BootstrapTimeout {
        /// Time spent before giving up
        elapsed_ms: u64,
    },

    /// Bootstrap failed or was abandoned before signalling ready
    #[error("Bootstrap failed: {message}")]
    Bootstrap {
        /// Description of the failure
        message: String,
    },

    /// The container was shut down
    #[error("Container has been shut down")]
    ShutDown,

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<ErrorSource>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<ErrorSource>,
    },
}

fn display_path(path: &[Token]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

// Provider failure creation methods
impl Error {
    /// Wrap an error returned by a constructor or synchronous factory
    ///
    /// Errors that already are container errors (for example a
    /// [`Error::TypeMismatch`] raised while reading dependencies) pass
    /// through unchanged.
    pub fn provider_failed(token: &Token, err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(inner) => inner,
            Err(err) => Self::ProviderFailed {
                token: token.clone(),
                message: format!("{err:#}"),
                source: Some(into_source(err)),
            },
        }
    }

    /// Wrap the rejection of an asynchronous factory
    pub fn async_rejection(token: &Token, err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(inner) => inner,
            Err(err) => Self::AsyncProviderRejection {
                token: token.clone(),
                message: format!("{err:#}"),
                source: Some(into_source(err)),
            },
        }
    }

    /// Create a provider failure from a plain message
    pub fn provider_message<S: Into<String>>(token: &Token, message: S) -> Self {
        Self::ProviderFailed {
            token: token.clone(),
            message: message.into(),
            source: None,
        }
    }
}

// Lookup error creation methods
impl Error {
    /// Create a token-not-found error
    pub fn token_not_found<S: Into<String>>(module: S, token: &Token) -> Self {
        Self::TokenNotFound {
            module: module.into(),
            token: token.clone(),
        }
    }

    /// Create a duplicate-token error
    pub fn duplicate_token<S: Into<String>>(module: S, token: &Token) -> Self {
        Self::DuplicateToken {
            module: module.into(),
            token: token.clone(),
        }
    }

    /// Create an unknown-module error
    pub fn unknown_module<S: Into<String>>(module: S) -> Self {
        Self::UnknownModule {
            module: module.into(),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Create a bootstrap error
    pub fn bootstrap<S: Into<String>>(message: S) -> Self {
        Self::Bootstrap {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether this error is one of the fail-fast resolution errors
    /// (missing token, cycle, or failing provider)
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::TokenNotFound { .. }
                | Self::CircularDependency { .. }
                | Self::AsyncProviderRejection { .. }
                | Self::ProviderFailed { .. }
                | Self::TypeMismatch { .. }
        )
    }
}

fn into_source(err: anyhow::Error) -> ErrorSource {
    let boxed: Box<dyn std::error::Error + Send + Sync> = err.into();
    Arc::from(boxed)
}
