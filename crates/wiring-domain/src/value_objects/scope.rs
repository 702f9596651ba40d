//! Instance lifecycle policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle policy for the instances of a class provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One instance per container, created on first resolution and cached
    /// until shutdown
    #[default]
    Singleton,
    /// A fresh instance for every injection point, owned by the requester
    Transient,
}

impl Scope {
    /// Whether instances of this scope are cached by the container
    pub fn is_cached(self) -> bool {
        matches!(self, Self::Singleton)
    }

    /// Lowercase name used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "transient" => Ok(Self::Transient),
            other => Err(Error::configuration(format!(
                "Invalid scope: {other}. Use singleton or transient"
            ))),
        }
    }
}
