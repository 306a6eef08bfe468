//! Vertex kinds
//!
//! Every vertex carries a kind drawn from a closed set declared up front by the
//! caller. A [`VertexKind`] can only be obtained by resolving a name against a
//! [`KindSet`], so an undeclared kind never reaches the graph.

use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Role a kind plays in the bipartite graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindRole {
    /// A real, recommendable entity (a menu item, a book)
    Item,
    /// A synthetic attribute bucket shared by items
    Category,
}

/// A validated vertex kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexKind {
    name: Arc<str>,
    role: KindRole,
}

impl VertexKind {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn role(&self) -> KindRole {
        self.role
    }

    #[inline]
    pub fn is_recommendable(&self) -> bool {
        self.role == KindRole::Item
    }
}

impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for VertexKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// The closed set of kinds a graph accepts
#[derive(Debug, Clone, Default)]
pub struct KindSet {
    kinds: AHashMap<String, VertexKind>,
}

impl KindSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a recommendable item kind. A name already declared keeps its
    /// first role; use [`KindSet::declare`] to detect the conflict.
    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>) -> Self {
        let _ = self.declare(name, KindRole::Item);
        self
    }

    /// Declare a category (attribute bucket) kind. A name already declared
    /// keeps its first role.
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        let _ = self.declare(name, KindRole::Category);
        self
    }

    /// Declare a kind.
    ///
    /// Redeclaring a name with the same role is a no-op. Redeclaring it with
    /// the other role fails with [`Error::KindConflict`] and leaves the set
    /// unchanged.
    pub fn declare(&mut self, name: impl Into<String>, role: KindRole) -> Result<()> {
        let name = name.into();
        if let Some(existing) = self.kinds.get(&name) {
            if existing.role != role {
                return Err(Error::KindConflict(name));
            }
            return Ok(());
        }
        let kind = VertexKind {
            name: Arc::from(name.as_str()),
            role,
        };
        self.kinds.insert(name, kind);
        Ok(())
    }

    /// Resolve a kind name, rejecting anything undeclared
    pub fn resolve(&self, name: &str) -> Result<VertexKind> {
        self.kinds
            .get(name)
            .cloned()
            .ok_or_else(|| Error::InvalidKind(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Declared kinds with the given role, sorted by name
    pub fn names(&self, role: KindRole) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .kinds
            .values()
            .filter(|k| k.role == role)
            .map(|k| k.name())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
