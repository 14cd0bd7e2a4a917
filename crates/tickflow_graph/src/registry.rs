// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node type registry.
//!
//! Maps a type name to a prototype [`NodeKind`] and creates nodes by name.
//! The first registration of a name wins; later ones are ignored.

use crate::error::{GraphError, Result};
use crate::ids::IdAllocator;
use crate::node::{Node, NodeId, NodeKind};
use indexmap::IndexMap;
use std::sync::Arc;

/// Registry of available node types
#[derive(Debug)]
pub struct NodeRegistry {
    ids: Arc<IdAllocator>,
    prototypes: IndexMap<String, Box<dyn NodeKind>>,
}

impl NodeRegistry {
    /// Create a new empty registry that draws ids from `ids`
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self {
            ids,
            prototypes: IndexMap::new(),
        }
    }

    /// Create a registry holding the built-in node catalogue
    pub fn with_builtins(ids: Arc<IdAllocator>) -> Self {
        let mut registry = Self::new(ids);
        crate::catalog::register_builtin_nodes(&mut registry);
        registry
    }

    /// Register a node type. Returns `false` if the name was already taken.
    pub fn register(&mut self, kind: impl NodeKind + 'static) -> bool {
        self.register_boxed(Box::new(kind))
    }

    /// Register a boxed node type. Returns `false` if the name was already taken.
    pub fn register_boxed(&mut self, kind: Box<dyn NodeKind>) -> bool {
        let name = kind.type_name().to_owned();
        if self.prototypes.contains_key(&name) {
            tracing::debug!("Node type {name:?} already registered, keeping the first");
            return false;
        }
        self.prototypes.insert(name, kind);
        true
    }

    /// Create a node of the named type with a fresh id
    pub fn create(&self, name: &str) -> Result<Node> {
        let prototype = self
            .prototypes
            .get(name)
            .ok_or_else(|| GraphError::UnknownType(name.to_owned()))?;
        Ok(Node::from_kind(prototype.clone_kind(), &self.ids))
    }

    /// Create a node of the named type under an existing id
    pub(crate) fn create_with_id(&self, name: &str, id: NodeId) -> Result<Node> {
        let prototype = self
            .prototypes
            .get(name)
            .ok_or_else(|| GraphError::UnknownType(name.to_owned()))?;
        Ok(Node::with_id(prototype.clone_kind(), id))
    }

    /// Like [`create`](Self::create), treating a missing name as unknown
    pub fn create_opt(&self, name: Option<&str>) -> Result<Node> {
        match name {
            Some(name) => self.create(name),
            None => Err(GraphError::UnknownType(String::new())),
        }
    }

    /// Whether a type is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// All registered type names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// The id allocator new nodes draw from
    pub fn ids(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    /// Remove every registered type
    pub fn clear(&mut self) {
        self.prototypes.clear();
    }
}
