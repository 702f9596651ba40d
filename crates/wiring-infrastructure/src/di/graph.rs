//! Static dependency-graph validation
//!
//! Every provider declares its dependency tokens up front, so missing
//! tokens and cycles can be found by walking declarations, before any
//! constructor or factory runs.

use std::collections::HashMap;

use wiring_domain::error::{Error, Result};
use wiring_domain::value_objects::Token;

use crate::di::container::{Container, SlotKey};
use crate::di::registry::ModuleId;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first walk over the declared dependencies of a container
pub struct DependencyGraph<'a> {
    container: &'a Container,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Validate every provider of every module
    pub fn validate_all(&self) -> Result<()> {
        let roots: Vec<SlotKey> = self
            .container
            .registries()
            .flat_map(|registry| {
                registry
                    .local_definitions()
                    .map(move |d| (registry.id(), d.provide().clone()))
            })
            .collect();
        self.validate_from(&roots)
    }

    /// Validate the dependency closure of `roots`
    ///
    /// Fails with [`Error::TokenNotFound`] for the first dependency not
    /// visible in its consumer's module, or [`Error::CircularDependency`]
    /// for the first cycle found.
    pub fn validate_from(&self, roots: &[SlotKey]) -> Result<()> {
        let mut marks = HashMap::new();
        let mut path = Vec::new();
        for (module, token) in roots {
            self.visit(*module, token, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        module: ModuleId,
        token: &Token,
        marks: &mut HashMap<SlotKey, Mark>,
        path: &mut Vec<SlotKey>,
    ) -> Result<()> {
        let (origin, definition) = self.container.locate(module, token)?;
        let key = (origin, token.clone());

        match marks.get(&key) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|k| *k == key).unwrap_or(0);
                let mut cycle: Vec<Token> =
                    path[start..].iter().map(|(_, t)| t.clone()).collect();
                cycle.push(token.clone());
                return Err(Error::CircularDependency { path: cycle });
            }
            None => {}
        }

        marks.insert(key.clone(), Mark::Visiting);
        path.push(key.clone());
        for dependency in definition.dependencies() {
            self.visit(origin, dependency, marks, path)?;
        }
        path.pop();
        marks.insert(key, Mark::Done);
        Ok(())
    }
}
