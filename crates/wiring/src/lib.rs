//! # Wiring
//!
//! Hierarchical dependency injection for async Rust applications.
//!
//! Providers are grouped into modules with an explicit export boundary.
//! A container built from the root module resolves tokens to shared
//! (singleton) or fresh (transient) instances, and bootstrap waits for
//! every asynchronous factory before the application is declared ready.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wiring::{Application, ContainerConfig, ModuleDescriptor, Token, ValueProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> wiring::Result<()> {
//! let greeting = Token::symbol("GREETING");
//! let root = ModuleDescriptor::new("app")
//!     .provider(ValueProvider::new(greeting.clone(), "hello".to_string()))
//!     .build();
//!
//! let app = Application::bootstrap(root, ContainerConfig::default()).await?;
//! let value: Arc<String> = app.container().resolve_as(&greeting).await?;
//! assert_eq!(value.as_str(), "hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Tokens, provider definitions, module descriptors and errors
//! - `infrastructure` - Registries, container, bootstrap, config and logging
//! - `demo` - Sample module graph used by the `wiring-demo` binary

/// Domain layer - tokens, providers, modules and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wiring_domain::*;
}

/// Infrastructure layer - container, bootstrap, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wiring_infrastructure::*;
}

pub mod demo;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the composition root at the crate root
pub use infrastructure::{
    AppConfig, Application, Bootstrapper, ConfigLoader, Container, ContainerConfig,
    LifecycleState, ResolutionState,
};
