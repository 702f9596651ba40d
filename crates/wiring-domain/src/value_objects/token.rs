//! Injection tokens
//!
//! A [`Token`] names an injectable dependency. Two kinds exist:
//!
//! | Kind | Constructor | Identity |
//! |------|-------------|----------|
//! | Type | [`Token::of`] | The Rust type (`TypeId`) |
//! | Symbol | [`Token::symbol`] | The allocation created by the call |
//!
//! Type tokens play the role of a class reference: asking for
//! `Token::of::<UserService>()` twice yields equal tokens. Symbol tokens are
//! opaque: every call to [`Token::symbol`] yields a new identity even when the
//! description repeats, and only clones of that token compare equal.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of an injectable dependency
#[derive(Clone)]
pub struct Token {
    kind: TokenKind,
}

#[derive(Clone)]
enum TokenKind {
    Type { id: TypeId, name: &'static str },
    Symbol(Arc<Symbol>),
}

struct Symbol {
    description: String,
}

impl Token {
    /// Token naming the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            kind: TokenKind::Type {
                id: TypeId::of::<T>(),
                name: type_name::<T>(),
            },
        }
    }

    /// A new opaque token, distinct from every other token
    pub fn symbol<S: Into<String>>(description: S) -> Self {
        Self {
            kind: TokenKind::Symbol(Arc::new(Symbol {
                description: description.into(),
            })),
        }
    }

    /// Human-readable name: the type path or the symbol description
    pub fn name(&self) -> &str {
        match &self.kind {
            TokenKind::Type { name, .. } => *name,
            TokenKind::Symbol(symbol) => symbol.description.as_str(),
        }
    }

    /// Name without the module path, for compact log output
    pub fn short_name(&self) -> &str {
        match &self.kind {
            TokenKind::Type { name, .. } => short_type_name(name),
            TokenKind::Symbol(symbol) => symbol.description.as_str(),
        }
    }

    /// Whether this token names exactly the type `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        matches!(self.kind, TokenKind::Type { id, .. } if id == TypeId::of::<T>())
    }
}

// Strips module paths while keeping generic arguments readable:
// `app::users::Repo<app::db::Pool>` becomes `Repo<app::db::Pool>`.
fn short_type_name(name: &str) -> &str {
    let head = name.split('<').next().unwrap_or(name);
    match head.rfind("::") {
        Some(idx) => &name[idx + 2..],
        None => name,
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (TokenKind::Type { id: a, .. }, TokenKind::Type { id: b, .. }) => a == b,
            (TokenKind::Symbol(a), TokenKind::Symbol(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.kind {
            TokenKind::Type { id, .. } => {
                0u8.hash(state);
                id.hash(state);
            }
            TokenKind::Symbol(symbol) => {
                1u8.hash(state);
                std::ptr::hash(Arc::as_ptr(symbol), state);
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Type { .. } => f.write_str(self.short_name()),
            TokenKind::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Type { name, .. } => f.debug_tuple("Token::Type").field(name).finish(),
            TokenKind::Symbol(symbol) => f
                .debug_tuple("Token::Symbol")
                .field(&symbol.description)
                .finish(),
        }
    }
}
