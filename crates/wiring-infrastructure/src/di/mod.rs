//! Dependency Injection System
//!
//! Hierarchical container built from module descriptors.
//!
//! ## Architecture Overview
//!
//! ```text
//! ModuleDescriptor (root)
//! ├── imports ─▶ ModuleDescriptor ─▶ ...
//! │
//! ▼
//! ModuleCompiler ─▶ ProviderRegistry per module (imports before importers)
//!                        │
//!                        ▼
//!                    Container ─▶ singleton slots per module
//!                        │
//!                        ▼
//!                   Bootstrapper ─▶ Application (Ready)
//! ```
//!
//! ## Key Principles
//!
//! - **Explicit wiring**: providers declare dependency tokens; no reflection
//! - **Encapsulation**: importers see exported tokens only
//! - **Shared singletons**: imported bindings resolve in the defining module
//! - **Fail fast**: missing tokens, cycles and rejected factories abort bootstrap

pub mod bootstrap;
pub mod container;
pub mod graph;
pub mod registry;

pub use bootstrap::{Application, Bootstrapper, LifecycleState, ReadySignal};
pub use container::{
    Container, ContainerSummary, ModuleSummary, ProviderSummary, ResolutionState,
};
pub use graph::DependencyGraph;
pub use registry::{Binding, ModuleId, ProviderRegistry};
