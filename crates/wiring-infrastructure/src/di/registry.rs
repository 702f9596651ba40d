//! Provider Registry
//!
//! One registry per module. It maps every token visible inside the module
//! to a [`Binding`]: either a provider the module defines itself, or a
//! pointer to the module that defines an imported provider.
//!
//! ```text
//! database registry            users registry
//! ─────────────────            ──────────────
//! DATABASE_URL  Local          DatabasePool    Imported { from: database }
//! DatabasePool  Local (export) UserRepository  Local
//!                              UserService     Local (export)
//! ```
//!
//! Imported bindings always point at the *defining* module, so re-exports
//! through intermediate modules still share a single singleton instance.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;
use wiring_domain::error::{Error, Result};
use wiring_domain::provider::ProviderDefinition;
use wiring_domain::value_objects::Token;

/// Index of a module inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a token became visible in a registry
#[derive(Debug, Clone)]
pub enum Binding {
    /// Defined by the module owning the registry
    Local(ProviderDefinition),
    /// Exported by another module and imported here
    Imported {
        /// Module holding the provider definition
        from: ModuleId,
        /// Name of that module, for diagnostics
        module: String,
    },
}

impl Binding {
    /// Whether the binding is defined locally
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

/// Tokens visible within one module, plus the subset it exports
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    id: ModuleId,
    name: String,
    bindings: HashMap<Token, Binding>,
    order: Vec<Token>,
    exports: HashSet<Token>,
}

impl ProviderRegistry {
    /// Empty registry for module `name`
    pub fn new<S: Into<String>>(id: ModuleId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            bindings: HashMap::new(),
            order: Vec::new(),
            exports: HashSet::new(),
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a provider defined by this module
    ///
    /// A local definition replaces an imported binding of the same token.
    /// Two local definitions of one token fail with
    /// [`Error::DuplicateToken`].
    pub fn register(&mut self, definition: ProviderDefinition) -> Result<()> {
        let token = definition.provide().clone();
        match self.bindings.get(&token) {
            Some(Binding::Local(_)) => {
                return Err(Error::duplicate_token(&self.name, &token));
            }
            Some(Binding::Imported { module, .. }) => {
                debug!(
                    module = %self.name,
                    token = %token,
                    shadowed = %module,
                    "Local provider shadows imported binding"
                );
            }
            None => self.order.push(token.clone()),
        }
        debug!(
            module = %self.name,
            token = %token,
            kind = %definition.kind(),
            "Registered provider"
        );
        self.bindings.insert(token, Binding::Local(definition));
        Ok(())
    }

    /// Import every token `other` exports
    ///
    /// Non-exported tokens are skipped and stay invisible here. Local
    /// definitions win over imports; importing one token from two different
    /// defining modules fails with [`Error::DuplicateToken`]. Returns the
    /// number of bindings added.
    pub fn import_exports(&mut self, other: &ProviderRegistry) -> Result<usize> {
        let mut added = 0;
        for token in other.order.iter().filter(|t| other.exports.contains(*t)) {
            let Some((origin, origin_name)) = other.origin_of(token) else {
                continue;
            };
            match self.bindings.get(token) {
                None => {
                    self.order.push(token.clone());
                    self.bindings.insert(
                        token.clone(),
                        Binding::Imported {
                            from: origin,
                            module: origin_name.to_string(),
                        },
                    );
                    added += 1;
                }
                Some(Binding::Local(_)) => {
                    debug!(
                        module = %self.name,
                        token = %token,
                        "Imported token shadowed by local provider"
                    );
                }
                Some(Binding::Imported { from, .. }) if *from == origin => {}
                Some(Binding::Imported { .. }) => {
                    return Err(Error::duplicate_token(&self.name, token));
                }
            }
        }
        debug!(
            module = %self.name,
            from = %other.name,
            added,
            "Imported exports"
        );
        Ok(added)
    }

    /// Expose a visible token to importers of this module
    pub fn export(&mut self, token: Token) -> Result<()> {
        if !self.bindings.contains_key(&token) {
            return Err(Error::UnknownExport {
                module: self.name.clone(),
                token,
            });
        }
        self.exports.insert(token);
        Ok(())
    }

    /// Binding for `token`, if visible in this module
    pub fn lookup(&self, token: &Token) -> Option<&Binding> {
        self.bindings.get(token)
    }

    /// Local definition for `token`
    pub fn definition(&self, token: &Token) -> Option<&ProviderDefinition> {
        match self.bindings.get(token) {
            Some(Binding::Local(definition)) => Some(definition),
            _ => None,
        }
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.bindings.contains_key(token)
    }

    pub fn is_exported(&self, token: &Token) -> bool {
        self.exports.contains(token)
    }

    /// Visible tokens in registration order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.order.iter()
    }

    /// Exported tokens in registration order
    pub fn exported_tokens(&self) -> impl Iterator<Item = &Token> {
        self.order.iter().filter(|t| self.exports.contains(*t))
    }

    /// Providers defined by this module in registration order
    pub fn local_definitions(&self) -> impl Iterator<Item = &ProviderDefinition> {
        self.order.iter().filter_map(|t| self.definition(t))
    }

    /// Number of visible tokens
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Defining module of a visible token
    fn origin_of(&self, token: &Token) -> Option<(ModuleId, &str)> {
        match self.bindings.get(token)? {
            Binding::Local(_) => Some((self.id, self.name.as_str())),
            Binding::Imported { from, module } => Some((*from, module.as_str())),
        }
    }
}
