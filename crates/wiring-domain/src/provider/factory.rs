//! Factory providers
//!
//! A factory receives its resolved dependencies and returns the value. The
//! container invokes it at most once and caches the result, so an
//! asynchronous factory gates application bootstrap exactly once.
//!
//! ```
//! use std::time::Duration;
//! use wiring_domain::provider::FactoryProvider;
//! use wiring_domain::value_objects::Token;
//!
//! struct Pool {
//!     url: String,
//! }
//!
//! let url = Token::symbol("DATABASE_URL");
//! let pool = FactoryProvider::new_async(Token::of::<Pool>(), [url], |mut deps| async move {
//!     let url = deps.next::<String>()?;
//!     tokio::time::sleep(Duration::from_millis(5)).await;
//!     Ok::<_, anyhow::Error>(Pool { url: url.to_string() })
//! });
//! assert!(pool.is_async());
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::ports::Dependencies;
use crate::value_objects::{Instance, Token};

/// Type-erased synchronous factory
pub type SyncFactory = Arc<dyn Fn(Dependencies) -> anyhow::Result<Instance> + Send + Sync>;

/// Type-erased asynchronous factory
pub type AsyncFactory =
    Arc<dyn Fn(Dependencies) -> BoxFuture<'static, anyhow::Result<Instance>> + Send + Sync>;

/// Factory flavour
#[derive(Clone)]
pub enum Factory {
    /// Runs to completion when invoked
    Sync(SyncFactory),
    /// Suspends until its future settles
    Async(AsyncFactory),
}

/// Provider whose value is the result of a factory function
#[derive(Clone)]
pub struct FactoryProvider {
    provide: Token,
    dependencies: Vec<Token>,
    factory: Factory,
}

impl FactoryProvider {
    /// Synchronous factory over `dependencies`
    pub fn new<T, F, I>(provide: Token, dependencies: I, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> anyhow::Result<T> + Send + Sync + 'static,
        I: IntoIterator<Item = Token>,
    {
        let factory: SyncFactory = Arc::new(move |deps| {
            let instance: Instance = Arc::new(factory(deps)?);
            Ok(instance)
        });
        Self {
            provide,
            dependencies: dependencies.into_iter().collect(),
            factory: Factory::Sync(factory),
        }
    }

    /// Asynchronous factory over `dependencies`
    pub fn new_async<T, F, Fut, I>(provide: Token, dependencies: I, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        I: IntoIterator<Item = Token>,
    {
        let factory: AsyncFactory = Arc::new(move |deps| {
            factory(deps)
                .map(|result| result.map(|value| Arc::new(value) as Instance))
                .boxed()
        });
        Self {
            provide,
            dependencies: dependencies.into_iter().collect(),
            factory: Factory::Async(factory),
        }
    }

    pub fn provide(&self) -> &Token {
        &self.provide
    }

    pub fn dependencies(&self) -> &[Token] {
        &self.dependencies
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    pub fn is_async(&self) -> bool {
        matches!(self.factory, Factory::Async(_))
    }
}

impl fmt::Debug for FactoryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryProvider")
            .field("provide", &self.provide)
            .field("dependencies", &self.dependencies)
            .field("async", &self.is_async())
            .finish_non_exhaustive()
    }
}
