//! Provider definitions
//!
//! A provider is the recipe the container follows to produce a token's
//! value. Three kinds exist:
//!
//! ```text
//! ProviderDefinition
//! ├── Class    new instance built from resolved dependencies (scoped)
//! ├── Value    a literal registered up front, returned as-is
//! └── Factory  a sync or async function over resolved dependencies
//! ```

pub mod class;
pub mod factory;
pub mod value;

use std::fmt;

pub use class::{ClassProvider, Constructor};
pub use factory::{AsyncFactory, Factory, FactoryProvider, SyncFactory};
pub use value::ValueProvider;

use crate::value_objects::{Scope, Token};

/// Discriminant of a [`ProviderDefinition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Instantiates a type
    Class,
    /// Returns a registered value
    Value,
    /// Invokes a synchronous factory
    Factory,
    /// Awaits an asynchronous factory
    AsyncFactory,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Value => "value",
            Self::Factory => "factory",
            Self::AsyncFactory => "async-factory",
        };
        f.write_str(name)
    }
}

/// A registered recipe for producing a token's value
#[derive(Clone)]
pub enum ProviderDefinition {
    /// Class provider
    Class(ClassProvider),
    /// Value provider
    Value(ValueProvider),
    /// Factory provider
    Factory(FactoryProvider),
}

impl ProviderDefinition {
    /// Token this provider is registered under
    pub fn provide(&self) -> &Token {
        match self {
            Self::Class(p) => p.provide(),
            Self::Value(p) => p.provide(),
            Self::Factory(p) => p.provide(),
        }
    }

    /// Tokens resolved before this provider runs, in declaration order
    pub fn dependencies(&self) -> &[Token] {
        match self {
            Self::Class(p) => p.dependencies(),
            Self::Value(_) => &[],
            Self::Factory(p) => p.dependencies(),
        }
    }

    /// Kind of recipe
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Class(_) => ProviderKind::Class,
            Self::Value(_) => ProviderKind::Value,
            Self::Factory(p) if p.is_async() => ProviderKind::AsyncFactory,
            Self::Factory(_) => ProviderKind::Factory,
        }
    }

    /// Scope for this provider given the container default
    ///
    /// Only class providers honour scopes. Values are returned as-is and
    /// factories run once, so both behave as singletons.
    pub fn effective_scope(&self, default_scope: Scope) -> Scope {
        match self {
            Self::Class(p) => p.scope().unwrap_or(default_scope),
            Self::Value(_) | Self::Factory(_) => Scope::Singleton,
        }
    }

    /// Whether resolution suspends on an asynchronous factory
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Factory(p) if p.is_async())
    }
}

impl fmt::Debug for ProviderDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(p) => p.fmt(f),
            Self::Value(p) => p.fmt(f),
            Self::Factory(p) => p.fmt(f),
        }
    }
}

impl From<ClassProvider> for ProviderDefinition {
    fn from(provider: ClassProvider) -> Self {
        Self::Class(provider)
    }
}

impl From<ValueProvider> for ProviderDefinition {
    fn from(provider: ValueProvider) -> Self {
        Self::Value(provider)
    }
}

impl From<FactoryProvider> for ProviderDefinition {
    fn from(provider: FactoryProvider) -> Self {
        Self::Factory(provider)
    }
}
