//! Class providers

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::ports::{Dependencies, Injectable};
use crate::value_objects::{Instance, Scope, Token};

/// Type-erased constructor of a class provider
pub type Constructor = Arc<dyn Fn(&mut Dependencies) -> anyhow::Result<Instance> + Send + Sync>;

/// Provider that instantiates a type from its resolved dependencies
///
/// Without an explicit scope the container's default scope applies.
#[derive(Clone)]
pub struct ClassProvider {
    provide: Token,
    type_name: &'static str,
    dependencies: Vec<Token>,
    scope: Option<Scope>,
    constructor: Constructor,
}

impl ClassProvider {
    /// Provide `T` under its own type token
    pub fn of<T: Injectable>() -> Self {
        Self::use_class::<T>(Token::of::<T>())
    }

    /// Provide `T` under an arbitrary token
    ///
    /// Consumers of `provide` receive a `T`; useful for binding an
    /// implementation to a symbol or to another type's token.
    pub fn use_class<T: Injectable>(provide: Token) -> Self {
        let constructor: Constructor = Arc::new(|deps: &mut Dependencies| {
            let instance: Instance = Arc::new(T::construct(deps)?);
            Ok(instance)
        });
        Self {
            provide,
            type_name: type_name::<T>(),
            dependencies: T::dependencies(),
            scope: None,
            constructor,
        }
    }

    /// Override the scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Shorthand for `with_scope(Scope::Singleton)`
    pub fn singleton(self) -> Self {
        self.with_scope(Scope::Singleton)
    }

    /// Shorthand for `with_scope(Scope::Transient)`
    pub fn transient(self) -> Self {
        self.with_scope(Scope::Transient)
    }

    pub fn provide(&self) -> &Token {
        &self.provide
    }

    /// Name of the instantiated type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn dependencies(&self) -> &[Token] {
        &self.dependencies
    }

    /// Explicit scope, if one was set
    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn constructor(&self) -> &Constructor {
        &self.constructor
    }
}

impl fmt::Debug for ClassProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassProvider")
            .field("provide", &self.provide)
            .field("type_name", &self.type_name)
            .field("dependencies", &self.dependencies)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
