//! Class-provider contract
//!
//! Types that the container instantiates declare their constructor
//! dependencies explicitly instead of relying on annotations or reflection.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wiring_domain::ports::{Dependencies, Injectable};
//! use wiring_domain::value_objects::Token;
//!
//! struct Database;
//!
//! struct UserRepository {
//!     db: Arc<Database>,
//! }
//!
//! impl Injectable for UserRepository {
//!     fn dependencies() -> Vec<Token> {
//!         vec![Token::of::<Database>()]
//!     }
//!
//!     fn construct(deps: &mut Dependencies) -> anyhow::Result<Self> {
//!         Ok(Self { db: deps.next()? })
//!     }
//! }
//! ```

use crate::ports::Dependencies;
use crate::value_objects::Token;

/// A type the container can construct from resolved dependencies
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Tokens handed to [`Injectable::construct`], in declaration order
    fn dependencies() -> Vec<Token> {
        Vec::new()
    }

    /// Build an instance from the resolved dependencies
    fn construct(deps: &mut Dependencies) -> anyhow::Result<Self>;
}
