//! Application Bootstrap
//!
//! Composition root: turns a root module descriptor and configuration into
//! a ready [`Application`].
//!
//! ```text
//! Created → Bootstrapping ──build──validate──async factories──eager──▶ Ready
//!                  │                                                   │
//!                  └──────────────── any error ──▶ Failed        shutdown ▶ ShutDown
//! ```
//!
//! Ready is published only after every asynchronous factory has settled.
//! Observers subscribe before the run starts:
//!
//! ```rust,ignore
//! let bootstrapper = Bootstrapper::new(root, config.container);
//! let mut ready = bootstrapper.subscribe();
//! let handle = tokio::spawn(bootstrapper.run());
//!
//! ready.wait().await?;
//! let app = handle.await??;
//! let controller = app.get::<UsersController>().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info};
use wiring_domain::error::{Error, Result};
use wiring_domain::module::ModuleDescriptor;
use wiring_domain::value_objects::{Instance, Token};

use crate::config::ContainerConfig;
use crate::di::container::Container;
use crate::utils::TimedOperation;

/// Application lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LifecycleState {
    /// Bootstrapper created, not started
    Created,
    /// Building the container and settling async factories
    Bootstrapping,
    /// Every async factory settled; the application may serve
    Ready,
    /// Bootstrap aborted with the given error message
    Failed(String),
    /// Container torn down
    ShutDown,
}

impl LifecycleState {
    /// Whether bootstrap has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Created | Self::Bootstrapping)
    }
}

/// Receiver side of the lifecycle channel
#[derive(Debug, Clone)]
pub struct ReadySignal {
    rx: watch::Receiver<LifecycleState>,
}

impl ReadySignal {
    /// Latest published state
    pub fn state(&self) -> LifecycleState {
        self.rx.borrow().clone()
    }

    /// Wait until bootstrap settles
    ///
    /// Resolves once the application is ready (or already shut down after
    /// having been ready). Fails when bootstrap failed or the bootstrapper
    /// was dropped before finishing.
    pub async fn wait(&mut self) -> Result<()> {
        let state = self
            .rx
            .wait_for(LifecycleState::is_settled)
            .await
            .map_err(|_| Error::bootstrap("bootstrapper dropped before completion"))?
            .clone();
        match state {
            LifecycleState::Failed(message) => Err(Error::bootstrap(message)),
            _ => Ok(()),
        }
    }
}

/// One-shot bootstrap run for a root module
pub struct Bootstrapper {
    root: Arc<ModuleDescriptor>,
    config: ContainerConfig,
    state: watch::Sender<LifecycleState>,
}

impl Bootstrapper {
    pub fn new(root: Arc<ModuleDescriptor>, config: ContainerConfig) -> Self {
        let (state, _) = watch::channel(LifecycleState::Created);
        Self {
            root,
            config,
            state,
        }
    }

    /// Observe the lifecycle of this bootstrap and the resulting application
    pub fn subscribe(&self) -> ReadySignal {
        ReadySignal {
            rx: self.state.subscribe(),
        }
    }

    /// Build the container and settle every async factory
    pub async fn run(self) -> Result<Application> {
        let timer = TimedOperation::start();
        self.state.send_replace(LifecycleState::Bootstrapping);
        info!(root = %self.root.name(), "Bootstrapping application");

        let result = match self.config.bootstrap_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.bootstrap_container())
                .await
                .unwrap_or_else(|_| {
                    Err(Error::BootstrapTimeout {
                        elapsed_ms: timer.elapsed_ms(),
                    })
                }),
            None => self.bootstrap_container().await,
        };

        match result {
            Ok(container) => {
                let duration = timer.elapsed();
                self.state.send_replace(LifecycleState::Ready);
                info!(
                    root = %self.root.name(),
                    elapsed_ms = timer.elapsed_ms(),
                    "Application ready"
                );
                Ok(Application {
                    container: Arc::new(container),
                    state: self.state,
                    bootstrap_duration: duration,
                })
            }
            Err(err) => {
                error!(
                    root = %self.root.name(),
                    resolution = err.is_resolution_error(),
                    error = %err,
                    "Bootstrap failed"
                );
                self.state
                    .send_replace(LifecycleState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn bootstrap_container(&self) -> Result<Container> {
        let container = Container::build(self.root.clone(), self.config.clone())?;

        if self.config.validate_graph {
            container.validate()?;
        }

        let factories = container.resolve_all_async().await?;
        info!(factories, "Async factories settled");

        if self.config.eager_singletons {
            let singletons = container.resolve_all_singletons().await?;
            info!(singletons, "Singletons resolved eagerly");
        }

        Ok(container)
    }
}

/// A bootstrapped application
pub struct Application {
    container: Arc<Container>,
    state: watch::Sender<LifecycleState>,
    bootstrap_duration: Duration,
}

impl Application {
    /// Bootstrap `root` without observing intermediate states
    pub async fn bootstrap(root: Arc<ModuleDescriptor>, config: ContainerConfig) -> Result<Self> {
        Bootstrapper::new(root, config).run().await
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> ReadySignal {
        ReadySignal {
            rx: self.state.subscribe(),
        }
    }

    /// Time spent between bootstrap start and ready
    pub fn bootstrap_duration(&self) -> Duration {
        self.bootstrap_duration
    }

    /// Resolve `token` from the root module
    pub async fn resolve(&self, token: &Token) -> Result<Instance> {
        self.container.resolve(token).await
    }

    /// Resolve the provider registered under `T`'s own type token
    pub async fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.container.get::<T>().await
    }

    /// Tear the container down and publish [`LifecycleState::ShutDown`]
    pub async fn shutdown(&self) -> usize {
        let released = self.container.shutdown().await;
        self.state.send_replace(LifecycleState::ShutDown);
        released
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("container", &self.container)
            .field("state", &self.state())
            .field("bootstrap_duration", &self.bootstrap_duration)
            .finish()
    }
}
