//! Container / Resolver
//!
//! Builds one [`ProviderRegistry`] per module from a root
//! [`ModuleDescriptor`] and resolves tokens against them.
//!
//! ## Resolution
//!
//! ```text
//! resolve(token)
//!   │
//!   ├─ locate binding in the requesting module (follow imports to origin)
//!   ├─ token already on this resolution path?  → CircularDependency
//!   ├─ singleton slot Resolved / Failed?        → replay
//!   ├─ resolve dependencies in declaration order (origin module context)
//!   └─ construct, then cache if singleton
//! ```
//!
//! Each singleton slot follows `Unresolved → Resolving → Resolved | Failed`.
//! A slot's lock is held while its instance is constructed: a second task
//! asking for the same token waits for the first instead of constructing
//! another instance. The state itself is published separately so it can be
//! read without touching the lock.
//!
//! Every resolution first walks the declared dependency closure of the
//! requested token. Locks are therefore only ever taken along an acyclic
//! graph, and a cycle fails with `CircularDependency` even when two tasks
//! enter it from opposite ends.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};
use wiring_domain::error::{Error, Result};
use wiring_domain::module::ModuleDescriptor;
use wiring_domain::ports::Dependencies;
use wiring_domain::provider::{Factory, ProviderDefinition};
use wiring_domain::value_objects::{Instance, Scope, Token, downcast_instance};

use crate::config::ContainerConfig;
use crate::constants::MAX_IMPORT_DEPTH;
use crate::di::graph::DependencyGraph;
use crate::di::registry::{Binding, ModuleId, ProviderRegistry};

/// A token as seen from its defining module
pub(crate) type SlotKey = (ModuleId, Token);

/// Observable resolution state of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    /// Not produced yet (always the case for transient providers)
    Unresolved,
    /// A resolution is in flight
    Resolving,
    /// Cached instance available
    Resolved,
    /// Resolution failed; the error is replayed on every request
    Failed,
}

impl ResolutionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Resolving,
            2 => Self::Resolved,
            3 => Self::Failed,
            _ => Self::Unresolved,
        }
    }
}

enum SlotValue {
    Unresolved,
    Resolved(Instance),
    Failed(Error),
}

/// Singleton cell: the value behind a construction lock, plus its state
struct Slot {
    value: Mutex<SlotValue>,
    state: AtomicU8,
}

impl Slot {
    fn new(value: SlotValue) -> Self {
        let state = match value {
            SlotValue::Unresolved => ResolutionState::Unresolved,
            SlotValue::Resolved(_) => ResolutionState::Resolved,
            SlotValue::Failed(_) => ResolutionState::Failed,
        };
        Self {
            value: Mutex::new(value),
            state: AtomicU8::new(state as u8),
        }
    }

    fn state(&self) -> ResolutionState {
        ResolutionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ResolutionState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

struct ModuleContext {
    registry: ProviderRegistry,
    slots: HashMap<Token, Arc<Slot>>,
}

/// Hierarchical DI container built from a root module descriptor
pub struct Container {
    modules: Vec<ModuleContext>,
    root: ModuleId,
    config: ContainerConfig,
    resolved_order: Mutex<Vec<SlotKey>>,
    shut_down: AtomicBool,
}

impl Container {
    /// Build registries for `root` and every module it transitively imports
    ///
    /// Each distinct descriptor (by `Arc` identity) becomes one module, so a
    /// module imported from several places shares its singletons.
    pub fn build(root: Arc<ModuleDescriptor>, config: ContainerConfig) -> Result<Self> {
        let mut compiler = ModuleCompiler::default();
        let root_id = compiler.compile(&root)?;

        let modules = compiler
            .registries
            .into_iter()
            .map(|registry| {
                let slots = create_slots(&registry, config.default_scope);
                ModuleContext { registry, slots }
            })
            .collect::<Vec<_>>();

        let providers: usize = modules
            .iter()
            .map(|m| m.registry.local_definitions().count())
            .sum();
        info!(
            root = %root.name(),
            modules = modules.len(),
            providers,
            default_scope = %config.default_scope,
            "Built container"
        );

        Ok(Self {
            modules,
            root: root_id,
            config,
            resolved_order: Mutex::new(Vec::new()),
            shut_down: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Root module id
    pub fn root(&self) -> ModuleId {
        self.root
    }

    /// Id of the first module named `name`
    pub fn module_id(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| m.registry.name() == name)
            .map(ModuleId::new)
    }

    /// Registry of a module
    pub fn registry(&self, module: ModuleId) -> Option<&ProviderRegistry> {
        self.modules.get(module.index()).map(|m| &m.registry)
    }

    /// Every module registry, imports before importers
    pub fn registries(&self) -> impl Iterator<Item = &ProviderRegistry> {
        self.modules.iter().map(|m| &m.registry)
    }

    /// Whether [`Container::shutdown`] has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve `token` from the root module
    pub async fn resolve(&self, token: &Token) -> Result<Instance> {
        self.resolve_in(self.root, token).await
    }

    /// Resolve `token` from the context of the module named `module`
    pub async fn resolve_from(&self, module: &str, token: &Token) -> Result<Instance> {
        let id = self
            .module_id(module)
            .ok_or_else(|| Error::unknown_module(module))?;
        self.resolve_in(id, token).await
    }

    /// Resolve `token` from the root module and downcast it
    pub async fn resolve_as<T: Send + Sync + 'static>(&self, token: &Token) -> Result<Arc<T>> {
        let instance = self.resolve(token).await?;
        downcast_instance(token, instance)
    }

    /// Resolve the provider registered under `T`'s own type token
    pub async fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.resolve_as(&Token::of::<T>()).await
    }

    /// Resolve `token` from the context of `module`
    ///
    /// Missing tokens and cycles in the dependency closure are reported
    /// before any provider runs or any singleton slot is locked.
    pub async fn resolve_in(&self, module: ModuleId, token: &Token) -> Result<Instance> {
        self.ensure_running()?;
        DependencyGraph::new(self).validate_from(&[(module, token.clone())])?;
        let mut path = Vec::new();
        self.resolve_token(module, token, &mut path).await
    }

    /// Resolve every asynchronous factory in every module
    ///
    /// Factories run concurrently; the first rejection aborts the pass and
    /// is returned. The dependency closure of the factories is validated
    /// first, which rules out cycles and therefore tasks waiting on each
    /// other. Returns the number of factories resolved.
    pub async fn resolve_all_async(&self) -> Result<usize> {
        self.ensure_running()?;
        let pending = self.async_factories();
        if pending.is_empty() {
            return Ok(0);
        }

        DependencyGraph::new(self).validate_from(&pending)?;

        debug!(count = pending.len(), "Resolving async factories");
        try_join_all(pending.iter().map(|(module, token)| async move {
            let mut path = Vec::new();
            self.resolve_token(*module, token, &mut path).await
        }))
        .await?;

        Ok(pending.len())
    }

    /// Resolve every singleton (class, value and factory) in every module
    ///
    /// Returns the number of singletons resolved.
    pub async fn resolve_all_singletons(&self) -> Result<usize> {
        self.ensure_running()?;
        let mut count = 0;
        for (index, module) in self.modules.iter().enumerate() {
            for token in module.slots.keys() {
                let mut path = Vec::new();
                self.resolve_token(ModuleId::new(index), token, &mut path)
                    .await?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Check every module for missing tokens and cycles without running
    /// any provider
    pub fn validate(&self) -> Result<()> {
        DependencyGraph::new(self).validate_all()
    }

    /// Current state of `token` as seen from the root module
    ///
    /// `None` when the token is not visible there.
    pub fn state(&self, token: &Token) -> Option<ResolutionState> {
        self.state_in(self.root, token)
    }

    /// Current state of `token` as seen from `module`
    pub fn state_in(&self, module: ModuleId, token: &Token) -> Option<ResolutionState> {
        let (origin, _) = self.locate(module, token).ok()?;
        let state = self.modules[origin.index()]
            .slots
            .get(token)
            .map_or(ResolutionState::Unresolved, |slot| slot.state());
        Some(state)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Release cached singletons in reverse resolution order
    ///
    /// Every later resolution fails with [`Error::ShutDown`]. Returns the
    /// number of instances released.
    pub async fn shutdown(&self) -> usize {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return 0;
        }
        let order = std::mem::take(&mut *self.resolved_order.lock().await);
        let mut released = 0;
        for (module, token) in order.into_iter().rev() {
            if let Some(slot) = self.modules[module.index()].slots.get(&token) {
                let mut guard = slot.value.lock().await;
                if matches!(*guard, SlotValue::Resolved(_)) {
                    trace!(token = %token, "Releasing singleton");
                    *guard = SlotValue::Unresolved;
                    slot.set_state(ResolutionState::Unresolved);
                    released += 1;
                }
            }
        }
        info!(released, "Container shut down");
        released
    }

    /// Per-module overview of registrations
    pub fn summary(&self) -> ContainerSummary {
        let modules = self
            .modules
            .iter()
            .map(|m| ModuleSummary {
                name: m.registry.name().to_string(),
                providers: m
                    .registry
                    .local_definitions()
                    .map(|d| ProviderSummary {
                        token: d.provide().to_string(),
                        kind: d.kind().to_string(),
                        scope: d.effective_scope(self.config.default_scope),
                        state: self
                            .state_in(m.registry.id(), d.provide())
                            .unwrap_or(ResolutionState::Unresolved),
                        exported: m.registry.is_exported(d.provide()),
                    })
                    .collect(),
                imported: m
                    .registry
                    .tokens()
                    .filter(|t| m.registry.lookup(t).is_some_and(|b| !b.is_local()))
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect();
        ContainerSummary {
            root: self.modules[self.root.index()].registry.name().to_string(),
            modules,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_running(&self) -> Result<()> {
        if self.is_shut_down() {
            return Err(Error::ShutDown);
        }
        Ok(())
    }

    /// Defining module and definition of `token` as seen from `module`
    pub(crate) fn locate(
        &self,
        module: ModuleId,
        token: &Token,
    ) -> Result<(ModuleId, &ProviderDefinition)> {
        let context = &self.modules[module.index()];
        let origin = match context.registry.lookup(token) {
            Some(Binding::Local(definition)) => return Ok((module, definition)),
            Some(Binding::Imported { from, .. }) => *from,
            None => return Err(Error::token_not_found(context.registry.name(), token)),
        };
        self.modules[origin.index()]
            .registry
            .definition(token)
            .map(|definition| (origin, definition))
            .ok_or_else(|| Error::token_not_found(context.registry.name(), token))
    }

    fn async_factories(&self) -> Vec<SlotKey> {
        self.modules
            .iter()
            .enumerate()
            .flat_map(|(index, module)| {
                module
                    .registry
                    .local_definitions()
                    .filter(|d| d.is_async())
                    .map(move |d| (ModuleId::new(index), d.provide().clone()))
            })
            .collect()
    }

    fn resolve_token<'a>(
        &'a self,
        module: ModuleId,
        token: &'a Token,
        path: &'a mut Vec<SlotKey>,
    ) -> BoxFuture<'a, Result<Instance>> {
        async move {
            let (origin, definition) = self.locate(module, token)?;
            let key = (origin, token.clone());

            if let Some(start) = path.iter().position(|k| *k == key) {
                let mut cycle: Vec<Token> =
                    path[start..].iter().map(|(_, t)| t.clone()).collect();
                cycle.push(token.clone());
                warn!(token = %token, "Circular dependency detected");
                return Err(Error::CircularDependency { path: cycle });
            }

            let Some(slot) = self.modules[origin.index()].slots.get(token) else {
                trace!(token = %token, "Creating transient instance");
                path.push(key);
                let result = self.instantiate(origin, definition, path).await;
                path.pop();
                return result;
            };

            let mut guard = slot.value.lock().await;
            match &*guard {
                SlotValue::Resolved(instance) => return Ok(instance.clone()),
                SlotValue::Failed(err) => return Err(err.clone()),
                SlotValue::Unresolved => {}
            }

            trace!(token = %token, kind = %definition.kind(), "Resolving singleton");
            slot.set_state(ResolutionState::Resolving);
            path.push(key.clone());
            let result = self.instantiate(origin, definition, path).await;
            path.pop();

            match &result {
                Ok(instance) => {
                    *guard = SlotValue::Resolved(instance.clone());
                    slot.set_state(ResolutionState::Resolved);
                    self.resolved_order.lock().await.push(key);
                }
                Err(err) => {
                    debug!(token = %token, error = %err, "Singleton resolution failed");
                    *guard = SlotValue::Failed(err.clone());
                    slot.set_state(ResolutionState::Failed);
                }
            }
            result
        }
        .boxed()
    }

    async fn instantiate(
        &self,
        module: ModuleId,
        definition: &ProviderDefinition,
        path: &mut Vec<SlotKey>,
    ) -> Result<Instance> {
        let token = definition.provide();
        let mut deps = self
            .resolve_dependencies(module, token, definition.dependencies(), path)
            .await?;

        match definition {
            ProviderDefinition::Value(provider) => Ok(provider.value().clone()),
            ProviderDefinition::Class(provider) => {
                (provider.constructor())(&mut deps).map_err(|e| Error::provider_failed(token, e))
            }
            ProviderDefinition::Factory(provider) => match provider.factory() {
                Factory::Sync(factory) => {
                    factory(deps).map_err(|e| Error::provider_failed(token, e))
                }
                Factory::Async(factory) => {
                    let timer = crate::utils::TimedOperation::start();
                    let result = factory(deps)
                        .await
                        .map_err(|e| Error::async_rejection(token, e));
                    debug!(
                        token = %token,
                        elapsed_ms = timer.elapsed_ms(),
                        ok = result.is_ok(),
                        "Async factory settled"
                    );
                    result
                }
            },
        }
    }

    async fn resolve_dependencies(
        &self,
        module: ModuleId,
        consumer: &Token,
        tokens: &[Token],
        path: &mut Vec<SlotKey>,
    ) -> Result<Dependencies> {
        let mut resolved = Vec::with_capacity(tokens.len());
        for dependency in tokens {
            let instance = self.resolve_token(module, dependency, path).await?;
            resolved.push((dependency.clone(), instance));
        }
        Ok(Dependencies::new(consumer.clone(), resolved))
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field(
                "modules",
                &self
                    .modules
                    .iter()
                    .map(|m| m.registry.name())
                    .collect::<Vec<_>>(),
            )
            .field("root", &self.root)
            .field("config", &self.config)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

/// Singleton slots of a module: values start resolved, class singletons and
/// factories start unresolved, transients get none
fn create_slots(registry: &ProviderRegistry, default_scope: Scope) -> HashMap<Token, Arc<Slot>> {
    registry
        .local_definitions()
        .filter(|d| d.effective_scope(default_scope).is_cached())
        .map(|d| {
            let value = match d {
                ProviderDefinition::Value(provider) => SlotValue::Resolved(provider.value().clone()),
                _ => SlotValue::Unresolved,
            };
            (d.provide().clone(), Arc::new(Slot::new(value)))
        })
        .collect()
}

/// Turns a descriptor tree into registries, imports first
#[derive(Default)]
struct ModuleCompiler {
    registries: Vec<ProviderRegistry>,
    ids: HashMap<*const ModuleDescriptor, ModuleId>,
    visiting: Vec<(*const ModuleDescriptor, String)>,
    // Keeps deferred descriptors alive so their addresses stay unique
    retained: Vec<Arc<ModuleDescriptor>>,
}

impl ModuleCompiler {
    fn compile(&mut self, descriptor: &Arc<ModuleDescriptor>) -> Result<ModuleId> {
        let ptr = Arc::as_ptr(descriptor);
        if let Some(id) = self.ids.get(&ptr) {
            return Ok(*id);
        }
        if let Some(start) = self.visiting.iter().position(|(p, _)| *p == ptr) {
            let mut path: Vec<String> = self.visiting[start..]
                .iter()
                .map(|(_, name)| name.clone())
                .collect();
            path.push(descriptor.name().to_string());
            return Err(Error::CircularImport { path });
        }
        // Deferred imports that build a fresh descriptor per call never
        // repeat an address; fall back to the first repeated name.
        if self.visiting.len() >= MAX_IMPORT_DEPTH {
            let start = self
                .visiting
                .iter()
                .position(|(_, name)| name == descriptor.name())
                .unwrap_or(0);
            let mut path: Vec<String> = self.visiting[start..]
                .iter()
                .map(|(_, name)| name.clone())
                .collect();
            path.push(descriptor.name().to_string());
            return Err(Error::CircularImport { path });
        }

        self.visiting.push((ptr, descriptor.name().to_string()));
        let imports = descriptor
            .imports()
            .iter()
            .map(|import| self.compile(&import.descriptor()))
            .collect::<Result<Vec<_>>>()?;
        self.visiting.pop();

        let id = ModuleId::new(self.registries.len());
        let mut registry = ProviderRegistry::new(id, descriptor.name());
        for definition in descriptor.provider_definitions() {
            registry.register(definition.clone())?;
        }
        for import in imports {
            registry.import_exports(&self.registries[import.index()])?;
        }
        for token in descriptor.exports() {
            registry.export(token.clone())?;
        }

        debug!(
            module = %descriptor.name(),
            id = %id,
            tokens = registry.len(),
            "Compiled module"
        );
        self.registries.push(registry);
        self.ids.insert(ptr, id);
        self.retained.push(Arc::clone(descriptor));
        Ok(id)
    }
}

/// Registration overview of a container
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSummary {
    /// Root module name
    pub root: String,
    /// Modules, imports before importers
    pub modules: Vec<ModuleSummary>,
}

/// Registration overview of one module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub providers: Vec<ProviderSummary>,
    /// Tokens visible through imports
    pub imported: Vec<String>,
}

/// One provider in a [`ModuleSummary`]
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSummary {
    pub token: String,
    pub kind: String,
    pub scope: Scope,
    pub state: ResolutionState,
    pub exported: bool,
}
