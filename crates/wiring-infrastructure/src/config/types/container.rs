//! Container configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wiring_domain::value_objects::Scope;

use crate::constants::{DEFAULT_EAGER_SINGLETONS, DEFAULT_VALIDATE_GRAPH};

/// Container behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Scope of class providers registered without an explicit scope
    ///
    /// Hook-style providers are documented both as shared and as
    /// per-instance; this setting makes the choice explicit.
    pub default_scope: Scope,

    /// Upper bound for the bootstrap pass in milliseconds
    ///
    /// `None` waits for asynchronous factories indefinitely.
    pub bootstrap_timeout_ms: Option<u64>,

    /// Resolve every singleton during bootstrap, not only async factories
    pub eager_singletons: bool,

    /// Check the whole dependency graph for missing tokens and cycles
    /// before any provider runs
    pub validate_graph: bool,
}

impl ContainerConfig {
    /// Bootstrap timeout as a `Duration`
    pub fn bootstrap_timeout(&self) -> Option<Duration> {
        self.bootstrap_timeout_ms.map(Duration::from_millis)
    }

    /// Set the default scope
    pub fn with_default_scope(mut self, scope: Scope) -> Self {
        self.default_scope = scope;
        self
    }

    /// Set the bootstrap timeout
    pub fn with_bootstrap_timeout(mut self, timeout: Duration) -> Self {
        self.bootstrap_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Enable or disable eager singleton resolution
    pub fn with_eager_singletons(mut self, eager: bool) -> Self {
        self.eager_singletons = eager;
        self
    }

    /// Enable or disable graph validation
    pub fn with_validate_graph(mut self, validate: bool) -> Self {
        self.validate_graph = validate;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            default_scope: Scope::Singleton,
            bootstrap_timeout_ms: None,
            eager_singletons: DEFAULT_EAGER_SINGLETONS,
            validate_graph: DEFAULT_VALIDATE_GRAPH,
        }
    }
}
