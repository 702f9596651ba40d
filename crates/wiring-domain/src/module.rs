//! Module descriptors
//!
//! A module groups provider definitions behind an export boundary. Importers
//! only see the tokens a module exports; everything else stays private to
//! the module and to the providers it defines.
//!
//! ```text
//! app ──imports──▶ users ──imports──▶ database
//!                   │                   └─ exports DatabasePool
//!                   └─ exports UserService (UserRepository stays private)
//! ```
//!
//! Descriptors are authored once and shared through `Arc`. Importing the
//! same `Arc` from several modules yields a single set of instances.
//!
//! Modules that refer to each other are wired with
//! [`ModuleDescriptor::import_deferred`]: the import is looked up when the
//! container is built, which lets a descriptor name a module that is
//! defined later. The container rejects the resulting import cycle.

use std::fmt;
use std::sync::Arc;

use crate::provider::ProviderDefinition;
use crate::value_objects::Token;

/// Produces an imported descriptor on demand
pub type ModuleFactory = Arc<dyn Fn() -> Arc<ModuleDescriptor> + Send + Sync>;

/// An imported module
#[derive(Clone)]
pub enum ModuleImport {
    /// Descriptor available when the importer is built
    Direct(Arc<ModuleDescriptor>),
    /// Descriptor looked up when the container is built
    Deferred(ModuleFactory),
}

impl ModuleImport {
    /// The imported descriptor
    pub fn descriptor(&self) -> Arc<ModuleDescriptor> {
        match self {
            Self::Direct(module) => Arc::clone(module),
            Self::Deferred(factory) => factory(),
        }
    }
}

impl fmt::Debug for ModuleImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(module) => write!(f, "{}", module.name()),
            Self::Deferred(_) => f.write_str("<deferred>"),
        }
    }
}

/// Static description of a module: providers, exports and imports
#[derive(Clone)]
pub struct ModuleDescriptor {
    name: String,
    providers: Vec<ProviderDefinition>,
    exports: Vec<Token>,
    imports: Vec<ModuleImport>,
}

impl ModuleDescriptor {
    /// Start describing a module named `name`
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            providers: Vec::new(),
            exports: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Add a provider definition
    pub fn provider<P: Into<ProviderDefinition>>(mut self, provider: P) -> Self {
        self.providers.push(provider.into());
        self
    }

    /// Add several provider definitions
    pub fn providers<I, P>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProviderDefinition>,
    {
        self.providers.extend(providers.into_iter().map(Into::into));
        self
    }

    /// Expose `token` to importing modules
    pub fn export(mut self, token: Token) -> Self {
        self.exports.push(token);
        self
    }

    /// Import another module's exports
    pub fn import(mut self, module: Arc<ModuleDescriptor>) -> Self {
        self.imports.push(ModuleImport::Direct(module));
        self
    }

    /// Import a module that is only reachable once every descriptor exists
    ///
    /// `module` should hand out the same `Arc` on every call, typically a
    /// clone of a lazily initialized static. A function that builds a fresh
    /// descriptor per call is compiled as a new module each time; if it
    /// leads back to itself the import chain is cut off and reported as
    /// circular.
    pub fn import_deferred<F>(mut self, module: F) -> Self
    where
        F: Fn() -> Arc<ModuleDescriptor> + Send + Sync + 'static,
    {
        self.imports.push(ModuleImport::Deferred(Arc::new(module)));
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider_definitions(&self) -> &[ProviderDefinition] {
        &self.providers
    }

    pub fn exports(&self) -> &[Token] {
        &self.exports
    }

    pub fn imports(&self) -> &[ModuleImport] {
        &self.imports
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("providers", &self.providers.len())
            .field("exports", &self.exports)
            .field("imports", &self.imports)
            .finish()
    }
}
