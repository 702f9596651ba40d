//! Value objects
//!
//! Small immutable types that identify dependencies and describe how long
//! their instances live.

pub mod instance;
pub mod scope;
pub mod token;

pub use instance::{Instance, downcast_instance};
pub use scope::Scope;
pub use token::Token;
