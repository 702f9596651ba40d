//! # Domain Layer
//!
//! Core vocabulary of the Wiring dependency-injection container.
//! Nothing in this crate resolves anything; it only describes *what* can be
//! resolved and *how* a value for a token is produced.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Tokens, scopes and type-erased instances |
//! | [`provider`] | Class, value and factory provider definitions |
//! | [`module`] | Module descriptors: providers, imports and exports |
//! | [`ports`] | The [`Injectable`](ports::Injectable) contract and dependency lists |
//! | [`error`] | Error taxonomy shared by every layer |
//!
//! ## Example
//!
//! ```
//! use wiring_domain::module::ModuleDescriptor;
//! use wiring_domain::provider::ValueProvider;
//! use wiring_domain::value_objects::Token;
//!
//! let api_url = Token::symbol("API_URL");
//! let module = ModuleDescriptor::new("config")
//!     .provider(ValueProvider::new(api_url.clone(), "https://api.example.com".to_string()))
//!     .export(api_url)
//!     .build();
//!
//! assert_eq!(module.provider_definitions().len(), 1);
//! assert_eq!(module.exports().len(), 1);
//! ```

pub mod error;
pub mod module;
pub mod ports;
pub mod provider;
pub mod value_objects;

pub use error::{Error, Result};
pub use module::{ModuleDescriptor, ModuleImport};
pub use ports::{Dependencies, Injectable};
pub use provider::{
    ClassProvider, Factory, FactoryProvider, ProviderDefinition, ProviderKind, ValueProvider,
};
pub use value_objects::{Instance, Scope, Token};
