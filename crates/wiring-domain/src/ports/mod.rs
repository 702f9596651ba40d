//! Port traits
//!
//! Contracts that user types implement so the container can build them.

pub mod dependencies;
pub mod injectable;

pub use dependencies::Dependencies;
pub use injectable::Injectable;
