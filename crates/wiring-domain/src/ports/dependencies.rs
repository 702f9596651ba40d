//! Resolved dependency lists

use std::sync::Arc;
use std::vec::IntoIter;

use crate::error::{Error, Result};
use crate::value_objects::{Instance, Token, downcast_instance};

/// Resolved dependencies of a provider, consumed in declaration order
pub struct Dependencies {
    consumer: Token,
    resolved: IntoIter<(Token, Instance)>,
}

impl Dependencies {
    /// Wrap the dependencies resolved for `consumer`
    pub fn new(consumer: Token, resolved: Vec<(Token, Instance)>) -> Self {
        Self {
            consumer,
            resolved: resolved.into_iter(),
        }
    }

    /// An empty list, for providers without dependencies
    pub fn empty(consumer: Token) -> Self {
        Self::new(consumer, Vec::new())
    }

    /// Token of the provider these dependencies were resolved for
    pub fn consumer(&self) -> &Token {
        &self.consumer
    }

    /// Take the next dependency as a concrete type
    pub fn next<T: Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let (token, instance) = self.next_entry()?;
        downcast_instance(&token, instance)
    }

    /// Take the next dependency without downcasting it
    pub fn next_instance(&mut self) -> Result<Instance> {
        self.next_entry().map(|(_, instance)| instance)
    }

    /// Number of dependencies not consumed yet
    pub fn remaining(&self) -> usize {
        self.resolved.len()
    }

    /// Whether every dependency was consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn next_entry(&mut self) -> Result<(Token, Instance)> {
        self.resolved.next().ok_or_else(|| {
            Error::provider_message(
                &self.consumer,
                "constructor asked for more dependencies than it declared",
            )
        })
    }
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies")
            .field("consumer", &self.consumer)
            .field("remaining", &self.remaining())
            .finish()
    }
}
