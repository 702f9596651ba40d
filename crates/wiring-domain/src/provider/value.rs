//! Value providers

use std::fmt;
use std::sync::Arc;

use crate::value_objects::{Instance, Token};

/// Provider returning a value supplied at registration time
///
/// Every resolution hands out the same `Arc`.
#[derive(Clone)]
pub struct ValueProvider {
    provide: Token,
    value: Instance,
}

impl ValueProvider {
    /// Register `value` under `provide`
    pub fn new<T: Send + Sync + 'static>(provide: Token, value: T) -> Self {
        Self::from_arc(provide, Arc::new(value))
    }

    /// Register an already shared value, keeping its identity
    pub fn from_arc<T: Send + Sync + 'static>(provide: Token, value: Arc<T>) -> Self {
        Self {
            provide,
            value: value as Instance,
        }
    }

    pub fn provide(&self) -> &Token {
        &self.provide
    }

    pub fn value(&self) -> &Instance {
        &self.value
    }
}

impl fmt::Debug for ValueProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueProvider")
            .field("provide", &self.provide)
            .finish_non_exhaustive()
    }
}
